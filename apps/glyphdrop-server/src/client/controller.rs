//! Upload & preview controller
//!
//! Drives one [`UploadSession`](super::session::UploadSession): file
//! selection and drops, previews, the extraction round trip and the
//! notifications that go with it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::file::{DragEvent, DropEvent, SelectedFile};
use super::notify::{Notification, Notifier};
use super::preview::PreviewRegistry;
use super::progress::{ProgressSettings, ProgressTicker};
use super::session::{SessionCell, SessionSnapshot};
use super::transport::ExtractionTransport;

pub const MSG_NO_FILE: &str = "Please select an image before extracting text";
pub const MSG_BUSY: &str = "An extraction is already running";
pub const MSG_SUCCESS: &str = "Text extracted successfully!";
pub const MSG_NO_TEXT: &str = "No text found in the image";
pub const MSG_FAILED: &str = "Error extracting text. Please try again.";

/// Controller timings
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub progress: ProgressSettings,
    /// Pause before leaving the busy state so the bar can reach 100%
    pub settle_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            progress: ProgressSettings::default(),
            settle_delay: Duration::from_millis(800),
        }
    }
}

/// How an [`UploadController::extract`] call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// Nothing staged; no request was sent
    NoFile,
    /// Another extraction was still running; no request was sent
    Busy,
    Extracted(String),
    NoText,
    Failed,
}

pub struct UploadController<T, N> {
    cell: Arc<SessionCell>,
    previews: PreviewRegistry,
    transport: T,
    notifier: N,
    options: ControllerOptions,
}

impl<T, N> UploadController<T, N>
where
    T: ExtractionTransport,
    N: Notifier,
{
    pub fn new(transport: T, notifier: N) -> Self {
        Self::with_options(transport, notifier, ControllerOptions::default())
    }

    pub fn with_options(transport: T, notifier: N, options: ControllerOptions) -> Self {
        Self {
            cell: Arc::new(SessionCell::new()),
            previews: PreviewRegistry::new(),
            transport,
            notifier,
            options,
        }
    }

    /// Picker selection; `None` is an empty selection and clears the preview
    pub fn select_file(&self, file: Option<SelectedFile>) {
        match file {
            Some(file) => {
                tracing::debug!(
                    file_name = %file.name,
                    mime_type = %file.mime_type,
                    bytes = file.len(),
                    "File selected"
                );
                let preview = self.previews.create(&file);
                self.cell.update(|s| s.stage(file, preview));
            }
            None => self.clear(),
        }
    }

    pub fn drag_over(&self, event: &mut DragEvent) {
        event.prevent_default();
    }

    /// Stage the first dropped file; a drop without files changes nothing
    pub fn drop_files(&self, event: &mut DropEvent) {
        event.prevent_default();
        if let Some(file) = event.take_first() {
            self.select_file(Some(file));
        }
    }

    /// Discard the staged file and release its preview
    pub fn clear(&self) {
        self.cell.update(|s| s.unstage());
    }

    /// Send the staged file to the gateway and record the result
    pub async fn extract(&self) -> ExtractOutcome {
        let (busy, file) = self.cell.read(|s| (s.busy, s.staged.clone()));
        if busy {
            self.notifier.notify(Notification::warning(MSG_BUSY));
            return ExtractOutcome::Busy;
        }
        let Some(file) = file else {
            self.notifier.notify(Notification::warning(MSG_NO_FILE));
            return ExtractOutcome::NoFile;
        };

        self.cell.update(|s| s.begin());
        let busy = BusyGuard::new(self.cell.clone());
        let ticker = ProgressTicker::start(self.cell.clone(), self.options.progress);

        let result = self.transport.extract(&file).await;
        ticker.stop();

        let outcome = match result {
            Ok(Some(text)) if !text.is_empty() => {
                self.cell.update(|s| s.complete(text.clone()));
                self.notifier.notify(Notification::success(MSG_SUCCESS));
                ExtractOutcome::Extracted(text)
            }
            Ok(_) => {
                self.notifier.notify(Notification::error(MSG_NO_TEXT));
                ExtractOutcome::NoText
            }
            Err(e) => {
                tracing::error!(file_name = %file.name, "Extraction failed: {}", e);
                self.notifier.notify(Notification::error(MSG_FAILED));
                ExtractOutcome::Failed
            }
        };

        tokio::time::sleep(self.options.settle_delay).await;
        drop(busy);

        outcome
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.cell.read(|s| s.snapshot())
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.cell.subscribe()
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }
}

/// Settles the session when dropped, whether `extract` finished or was cancelled
struct BusyGuard {
    cell: Arc<SessionCell>,
}

impl BusyGuard {
    fn new(cell: Arc<SessionCell>) -> Self {
        Self { cell }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.cell.update(|s| s.settle());
    }
}
