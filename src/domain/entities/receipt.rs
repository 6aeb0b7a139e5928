//! Receipt file name value object.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::errors::ReceiptError;

// Anchored at the end of the name: `facture.png.pdf` must not pass.
static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(png|jpe?g)$").expect("valid receipt extension pattern"));

/// A validated receipt file name.
///
/// Built from the path-like value a file input reports (the last path
/// segment is kept) and accepted only for `png`, `jpg`, and `jpeg` files,
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFileName(String);

impl ReceiptFileName {
    /// Parses the file-input value into a validated file name.
    ///
    /// # Errors
    /// Returns `ReceiptError::EmptySelection` when no file name remains
    /// after stripping path segments, and `ReceiptError::UnsupportedFormat`
    /// when the extension is not an accepted image format.
    pub fn parse(input_value: &str) -> Result<Self, ReceiptError> {
        let file_name = input_value
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or_default()
            .trim();

        if file_name.is_empty() {
            return Err(ReceiptError::EmptySelection);
        }

        if !IMAGE_EXTENSION.is_match(file_name) {
            return Err(ReceiptError::UnsupportedFormat {
                file_name: file_name.to_string(),
            });
        }

        Ok(Self(file_name.to_string()))
    }

    /// Returns the file name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ReceiptFileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
