//! Upload session state
//!
//! The session lives behind a mutex shared by the controller and the
//! progress ticker. Every mutation publishes a [`SessionSnapshot`] to
//! watchers.

use parking_lot::Mutex;
use tokio::sync::watch;

use super::file::SelectedFile;
use super::preview::PreviewHandle;

/// Transient state of one browser-like session
#[derive(Debug, Default)]
pub struct UploadSession {
    pub(crate) staged: Option<SelectedFile>,
    pub(crate) preview: Option<PreviewHandle>,
    pub(crate) file_name: String,
    pub(crate) text: String,
    pub(crate) busy: bool,
    pub(crate) progress: u8,
}

impl UploadSession {
    /// Stage a file with its preview; the previous preview is released
    pub(crate) fn stage(&mut self, file: SelectedFile, preview: PreviewHandle) {
        self.file_name = file.name.clone();
        self.staged = Some(file);
        self.preview = Some(preview);
    }

    /// Forget the staged file and release its preview
    pub(crate) fn unstage(&mut self) {
        self.file_name.clear();
        self.staged = None;
        self.preview = None;
    }

    /// Enter the busy state at the start of an extraction
    pub(crate) fn begin(&mut self) {
        self.busy = true;
        self.text.clear();
        self.progress = 0;
    }

    /// Advance the simulated progress by `step`, never past `ceiling`
    pub(crate) fn advance(&mut self, step: u8, ceiling: u8) {
        if self.progress < ceiling {
            self.progress = self.progress.saturating_add(step).min(ceiling);
        }
    }

    pub(crate) fn complete(&mut self, text: String) {
        self.text = text;
        self.progress = 100;
    }

    /// Leave the busy state after the settle delay
    pub(crate) fn settle(&mut self) {
        self.busy = false;
        self.progress = 0;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            file_name: self.file_name.clone(),
            preview_url: self.preview.as_ref().map(|p| p.url().to_string()),
            has_file: self.staged.is_some(),
            text: self.text.clone(),
            busy: self.busy,
            progress: self.progress,
        }
    }
}

/// Immutable copy of the session for renderers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub file_name: String,
    pub preview_url: Option<String>,
    pub has_file: bool,
    pub text: String,
    pub busy: bool,
    /// 0..=100
    pub progress: u8,
}

/// Session plus its snapshot channel
pub(crate) struct SessionCell {
    session: Mutex<UploadSession>,
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionCell {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self {
            session: Mutex::new(UploadSession::default()),
            tx,
        }
    }

    /// Mutate the session and publish the resulting snapshot
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut UploadSession) -> R) -> R {
        let mut session = self.session.lock();
        let result = f(&mut *session);
        self.tx.send_replace(session.snapshot());
        result
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&UploadSession) -> R) -> R {
        let session = self.session.lock();
        f(&*session)
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_stops_at_ceiling() {
        let mut session = UploadSession::default();
        for _ in 0..20 {
            session.advance(10, 90);
        }
        assert_eq!(session.progress, 90);
    }

    #[test]
    fn test_advance_never_lowers_completed_progress() {
        let mut session = UploadSession::default();
        session.complete("done".to_string());
        session.advance(10, 90);
        assert_eq!(session.progress, 100);
    }

    #[test]
    fn test_begin_resets_text_and_progress() {
        let mut session = UploadSession::default();
        session.complete("old".to_string());
        session.begin();

        assert!(session.busy);
        assert!(session.text.is_empty());
        assert_eq!(session.progress, 0);
    }

    #[test]
    fn test_update_publishes_snapshot() {
        let cell = SessionCell::new();
        let rx = cell.subscribe();

        cell.update(|s| s.begin());

        assert!(rx.borrow().busy);
    }
}
