//! Session storage error types.

use thiserror::Error;

/// Session accessor failure variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SessionError {
    #[error("failed to determine session directory")]
    DirUnavailable,

    #[error("session io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session record is corrupted: {message}")]
    Corrupted { message: String },
}

impl SessionError {
    /// Creates a corrupted-record error.
    #[must_use]
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted {
            message: message.into(),
        }
    }
}
