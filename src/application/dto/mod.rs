//! Application data transfer objects.

mod bill_form;

pub use bill_form::{BillForm, ReceiptPreview, UploadedReceipt};
