use std::sync::{Arc, Mutex};
use serde::{Deserialize, Serialize};

// ============================================================================
// Notification Sink - fire-and-forget operator notices
// ============================================================================

/// Non-fatal warning shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Receives notices; no acknowledgement is expected
pub trait NotificationSink {
    fn notify(&self, notice: Notice);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Writes notices to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: Notice) {
        tracing::warn!(title = %notice.title, "{}", notice.message);
    }
}

/// Keeps every notice it receives
#[derive(Debug, Default)]
pub struct MemorySink {
    notices: Mutex<Vec<Notice>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
