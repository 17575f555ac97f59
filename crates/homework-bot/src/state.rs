//! In-memory suppression of repeated notifications.

/// Last delivered status message and last reported error.
///
/// Only the most recent value of each is kept, so a message is suppressed
/// only when it equals the previous one. Lost on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupState {
    last_message: Option<String>,
    last_error: Option<String>,
}

impl DedupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `message` differs from the last delivered status message.
    pub fn is_new_message(&self, message: &str) -> bool {
        self.last_message.as_deref() != Some(message)
    }

    /// Remember `message` as delivered.
    pub fn record_message(&mut self, message: String) {
        self.last_message = Some(message);
    }

    /// Whether `error` differs from the last reported error.
    pub fn is_new_error(&self, error: &str) -> bool {
        self.last_error.as_deref() != Some(error)
    }

    /// Remember `error` as reported.
    pub fn record_error(&mut self, error: String) {
        self.last_error = Some(error);
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
