//! New-bill form DTOs.

use tracing::warn;

use crate::domain::entities::{BillKey, ExpenseType};

/// Tax percentage applied when the form field is missing or invalid.
pub const DEFAULT_PCT: u32 = 20;

/// Raw field values read from the submission form.
///
/// Free inputs stay strings; coercion to record values happens at submit
/// time, mirroring what the form reports rather than what the record needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillForm {
    /// Selected expense category.
    pub expense_type: ExpenseType,
    /// Expense label.
    pub name: String,
    /// Amount field, uncoerced.
    pub amount: String,
    /// Date field, `YYYY-MM-DD`.
    pub date: String,
    /// Value-added-tax amount field.
    pub vat: String,
    /// Tax percentage field, uncoerced.
    pub pct: String,
    /// Free-text commentary.
    pub commentary: String,
}

impl BillForm {
    /// Amount in currency units; missing or unparseable input coerces to 0.
    #[must_use]
    pub fn amount_value(&self) -> i64 {
        self.amount.trim().parse().unwrap_or_else(|_| {
            warn!(amount = %self.amount, "Amount field is not an integer, submitting 0");
            0
        })
    }

    /// Tax percentage; missing, zero, or unparseable input coerces to 20.
    #[must_use]
    pub fn pct_value(&self) -> u32 {
        self.pct
            .trim()
            .parse()
            .ok()
            .filter(|pct| *pct > 0)
            .unwrap_or(DEFAULT_PCT)
    }
}

/// Receipt reference captured by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedReceipt {
    /// Location of the stored file.
    pub file_url: String,
    /// Validated file name.
    pub file_name: String,
    /// Store-issued key correlating the later update.
    pub key: BillKey,
}

/// What the receipt preview modal needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptPreview {
    /// Location of the stored receipt file.
    pub file_url: String,
    /// Receipt file name, when known.
    pub file_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn form_with_pct(pct: &str) -> BillForm {
        BillForm {
            pct: pct.to_string(),
            ..BillForm::default()
        }
    }

    #[test_case("50", 50 ; "plain integer")]
    #[test_case(" 50 ", 50 ; "surrounding whitespace")]
    #[test_case("", DEFAULT_PCT ; "empty")]
    #[test_case("abc", DEFAULT_PCT ; "non numeric")]
    #[test_case("0", DEFAULT_PCT ; "zero")]
    #[test_case("-5", DEFAULT_PCT ; "negative")]
    fn test_pct_coercion(input: &str, expected: u32) {
        assert_eq!(form_with_pct(input).pct_value(), expected);
    }

    #[test_case("42", 42 ; "plain integer")]
    #[test_case("", 0 ; "empty")]
    #[test_case("12.5", 0 ; "decimal")]
    fn test_amount_coercion(input: &str, expected: i64) {
        let form = BillForm {
            amount: input.to_string(),
            ..BillForm::default()
        };
        assert_eq!(form.amount_value(), expected);
    }
}
