//! Remote store error types.

use thiserror::Error;

/// Remote store failure variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("network error reaching the store: {message}")]
    Network { message: String },

    #[error("store rejected the request: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("failed to decode store response: {message}")]
    Decode { message: String },

    #[error("unexpected store error: {message}")]
    Unexpected { message: String },
}

impl StoreError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a rejected-request error.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_status() {
        let err = StoreError::rejected(404, "Erreur 404");
        assert_eq!(
            err.to_string(),
            "store rejected the request: 404 - Erreur 404"
        );
    }

    #[test]
    fn test_network_classification() {
        assert!(StoreError::network("timeout").is_network_error());
        assert!(!StoreError::decode("bad json").is_network_error());
    }
}
