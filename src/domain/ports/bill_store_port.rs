//! Bill store port definition.

use async_trait::async_trait;

use crate::domain::entities::{Bill, BillKey};
use crate::domain::errors::StoreError;

/// Payload for the receipt-create operation: the file and the submitter's
/// email, sent as one multipart request.
#[derive(Debug, Clone)]
pub struct CreateBillRequest {
    /// Submitter's email address.
    pub email: String,
    /// Receipt file name, already validated.
    pub file_name: String,
    /// Raw receipt file content.
    pub bytes: Vec<u8>,
}

impl CreateBillRequest {
    /// Creates a new upload payload.
    #[must_use]
    pub fn new(email: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            email: email.into(),
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Result of a successful receipt-create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBill {
    /// Location of the stored receipt file.
    pub file_url: String,
    /// Store-issued record key, the selector for the follow-up update.
    pub key: BillKey,
}

/// Port for the resource-scoped remote bill store.
#[async_trait]
pub trait BillStorePort: Send + Sync {
    /// Creates a bill record from an uploaded receipt.
    async fn create_bill(&self, request: CreateBillRequest) -> Result<CreatedBill, StoreError>;

    /// Updates the record addressed by `selector` with the submitted bill.
    async fn update_bill(&self, bill: &Bill, selector: &BillKey) -> Result<Bill, StoreError>;

    /// Lists the connected employee's bill records.
    async fn list_bills(&self) -> Result<Vec<Bill>, StoreError>;
}
