//! Bill record entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::expense_type::ExpenseType;

/// Opaque identifier issued by the remote store when a receipt is created,
/// used as the selector for the follow-up update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillKey(String);

impl BillKey {
    /// Wraps a store-issued key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BillKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BillKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Review status of a bill. Only `Pending` is ever produced by this client;
/// the other two are set by the back office.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Approved by an administrator.
    Accepted,
    /// Rejected by an administrator.
    Refused,
}

impl BillStatus {
    /// Returns the label shown in the listing view.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Accepted => "Accepté",
            Self::Refused => "Refusé",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An expense-report record.
///
/// Exists in memory between submit and the store update; the remote store
/// is the system of record. Serialization uses the service's wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    email: String,
    #[serde(rename = "type")]
    expense_type: ExpenseType,
    name: String,
    amount: i64,
    date: String,
    vat: String,
    pct: u32,
    #[serde(default)]
    commentary: String,
    #[serde(default)]
    file_url: Option<String>,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    status: BillStatus,
}

impl Bill {
    /// Creates a pending bill with no receipt attached.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        expense_type: ExpenseType,
        name: impl Into<String>,
        amount: i64,
        date: impl Into<String>,
        vat: impl Into<String>,
        pct: u32,
        commentary: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            email: email.into(),
            expense_type,
            name: name.into(),
            amount,
            date: date.into(),
            vat: vat.into(),
            pct,
            commentary: commentary.into(),
            file_url: None,
            file_name: None,
            status: BillStatus::Pending,
        }
    }

    /// Attaches the receipt reference captured during upload.
    #[must_use]
    pub fn with_receipt(mut self, file_url: impl Into<String>, file_name: impl Into<String>) -> Self {
        self.file_url = Some(file_url.into());
        self.file_name = Some(file_name.into());
        self
    }

    /// Sets the store-issued record identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the review status.
    #[must_use]
    pub const fn with_status(mut self, status: BillStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the record identifier, when the store has issued one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the submitter's email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the expense category.
    #[must_use]
    pub const fn expense_type(&self) -> ExpenseType {
        self.expense_type
    }

    /// Returns the expense label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the amount in currency units.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the raw `YYYY-MM-DD` date string.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the value-added-tax amount as entered.
    #[must_use]
    pub fn vat(&self) -> &str {
        &self.vat
    }

    /// Returns the tax percentage.
    #[must_use]
    pub const fn pct(&self) -> u32 {
        self.pct
    }

    /// Returns the free-text commentary.
    #[must_use]
    pub fn commentary(&self) -> &str {
        &self.commentary
    }

    /// Returns the receipt location, set only after a successful upload.
    #[must_use]
    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    /// Returns the receipt file name.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Returns the review status.
    #[must_use]
    pub const fn status(&self) -> BillStatus {
        self.status
    }

    /// Parses the date field; `None` when the stored string is not a date.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bill() -> Bill {
        Bill::new(
            "a@a",
            ExpenseType::Transports,
            "Taxi",
            42,
            "2023-01-01",
            "10",
            20,
            "ok",
        )
    }

    #[test]
    fn test_new_bill_is_pending_without_receipt() {
        let bill = make_bill();
        assert_eq!(bill.status(), BillStatus::Pending);
        assert_eq!(bill.file_url(), None);
        assert_eq!(bill.file_name(), None);
        assert_eq!(bill.id(), None);
    }

    #[test]
    fn test_with_receipt() {
        let bill = make_bill().with_receipt("https://x", "test.png");
        assert_eq!(bill.file_url(), Some("https://x"));
        assert_eq!(bill.file_name(), Some("test.png"));
    }

    #[test]
    fn test_serializes_wire_names() {
        let bill = make_bill().with_receipt("https://x", "test.png");
        let json = serde_json::to_value(&bill).unwrap();

        assert_eq!(json["type"], "Transports");
        assert_eq!(json["fileUrl"], "https://x");
        assert_eq!(json["fileName"], "test.png");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["amount"], 42);
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_deserializes_listing_record() {
        let json = r#"{
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": "80",
            "fileUrl": "https://test.storage.tld/receipt.jpg",
            "status": "pending",
            "type": "Hôtel et logement",
            "commentary": "séminaire billed",
            "name": "encore",
            "fileName": "receipt.jpg",
            "date": "2004-04-04",
            "amount": 400,
            "email": "a@a",
            "pct": 20
        }"#;

        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.id(), Some("47qAXb6fIm2zOKkLzMro"));
        assert_eq!(bill.expense_type(), ExpenseType::HotelEtLogement);
        assert_eq!(bill.amount(), 400);
        assert_eq!(bill.parsed_date(), NaiveDate::from_ymd_opt(2004, 4, 4));
    }

    #[test]
    fn test_parsed_date_rejects_garbage() {
        let bill = Bill::new(
            "a@a",
            ExpenseType::Transports,
            "t",
            1,
            "not-a-date",
            "0",
            20,
            "",
        );
        assert_eq!(bill.parsed_date(), None);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(BillStatus::Pending.label(), "En attente");
        assert_eq!(BillStatus::Accepted.label(), "Accepté");
        assert_eq!(BillStatus::Refused.label(), "Refusé");
    }
}
