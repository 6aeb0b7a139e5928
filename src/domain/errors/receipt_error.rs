//! Receipt validation error types.

use thiserror::Error;

/// Rejection reasons for a chosen receipt file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ReceiptError {
    #[error("no file selected")]
    EmptySelection,

    #[error("unsupported receipt format: {file_name} (expected png, jpg or jpeg)")]
    UnsupportedFormat { file_name: String },
}
