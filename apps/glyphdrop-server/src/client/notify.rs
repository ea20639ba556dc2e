//! Toast notifications

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A transient user-facing message
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}

/// Sink for notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Logs every toast and keeps the most recent ones
pub struct ToastLog {
    entries: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl ToastLog {
    pub const DEFAULT_CAPACITY: usize = 32;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// Notifications in arrival order
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries.lock().back().cloned()
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .lock()
            .iter()
            .any(|n| n.level == NotificationLevel::Error)
    }
}

impl Default for ToastLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastLog {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!("{}", notification.message),
            NotificationLevel::Warning => tracing::warn!("{}", notification.message),
            NotificationLevel::Error => tracing::error!("{}", notification.message),
        }

        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_log_is_bounded() {
        let log = ToastLog::with_capacity(2);
        log.notify(Notification::warning("one"));
        log.notify(Notification::success("two"));
        log.notify(Notification::error("three"));

        let messages: Vec<_> = log.entries().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert!(log.has_errors());
    }

    #[test]
    fn test_notifier_through_arc() {
        let log = Arc::new(ToastLog::new());
        let notifier: Arc<ToastLog> = log.clone();
        notifier.notify(Notification::success("ok"));

        assert_eq!(log.last().unwrap().level, NotificationLevel::Success);
    }
}
