//! New-bill submission container.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::dto::{BillForm, UploadedReceipt};
use crate::domain::entities::{Bill, BillKey, ReceiptFileName};
use crate::domain::errors::{ReceiptError, SessionError, StoreError};
use crate::domain::ports::{BillStorePort, CreateBillRequest, NavigationPort, SessionPort};
use crate::domain::routes::Route;

/// Failure variants of the new-bill commands.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum NewBillError {
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error("no connected user in session")]
    NoSession,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("no backing store configured")]
    NoBackingStore,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What happened to the store update step of a submit.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// No store handle configured; the update is a no-op.
    NoStore,
    /// No receipt was uploaded, so there is no record to address.
    NoReceipt,
    /// The store accepted the update.
    Updated(Bill),
    /// The store rejected the update. Navigation happened anyway.
    Failed(StoreError),
}

/// Result of a submit: the assembled record and the update outcome.
///
/// Navigation to the bills listing has already been requested by the time
/// the caller sees this; it is never gated on the update.
#[derive(Debug)]
pub struct SubmitOutcome {
    /// The bill record as submitted.
    pub bill: Bill,
    /// Outcome of the update step.
    pub update: UpdateOutcome,
}

/// Container for the new-bill form view.
///
/// Holds the receipt reference between the file-change command and the
/// submit command. The caller is expected to let a change command finish
/// before dispatching a submit; commands are processed one at a time.
pub struct NewBillContainer {
    store: Option<Arc<dyn BillStorePort>>,
    session: Arc<dyn SessionPort>,
    navigation: Arc<dyn NavigationPort>,
    file_url: Option<String>,
    file_name: Option<String>,
    bill_id: Option<BillKey>,
}

impl NewBillContainer {
    /// Creates a container. A `None` store supports isolated UI tests; the
    /// update step then degrades to a no-op.
    #[must_use]
    pub fn new(
        store: Option<Arc<dyn BillStorePort>>,
        session: Arc<dyn SessionPort>,
        navigation: Arc<dyn NavigationPort>,
    ) -> Self {
        Self {
            store,
            session,
            navigation,
            file_url: None,
            file_name: None,
            bill_id: None,
        }
    }

    /// Returns the captured receipt location, if any.
    #[must_use]
    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    /// Returns the captured receipt file name, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Returns the store-issued correlation key, if any.
    #[must_use]
    pub const fn bill_id(&self) -> Option<&BillKey> {
        self.bill_id.as_ref()
    }

    /// Handles a file-selection change: validates the chosen file and
    /// uploads it together with the connected user's email.
    ///
    /// On success the receipt reference is captured for the later submit.
    /// On upload failure the captured state is left unchanged.
    ///
    /// # Errors
    /// `ReceiptError` when the file name is not an accepted image format
    /// (no store call is made), `StoreError` when the upload fails.
    pub async fn handle_change_file(
        &mut self,
        input_value: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedReceipt, NewBillError> {
        let file_name = ReceiptFileName::parse(input_value)?;

        let store = self.store.as_ref().ok_or(NewBillError::NoBackingStore)?;
        let employee = self
            .session
            .current_user()?
            .ok_or(NewBillError::NoSession)?;

        debug!(file = %file_name, "Uploading receipt");

        let request = CreateBillRequest::new(employee.email(), file_name.as_str(), bytes);
        let created = store.create_bill(request).await.map_err(|e| {
            error!(error = %e, file = %file_name, "Receipt upload failed");
            e
        })?;

        self.bill_id = Some(created.key.clone());
        self.file_url = Some(created.file_url.clone());
        self.file_name = Some(file_name.as_str().to_string());

        info!(key = %created.key, "Receipt stored");

        Ok(UploadedReceipt {
            file_url: created.file_url,
            file_name: file_name.into_inner(),
            key: created.key,
        })
    }

    /// Handles the form submit: assembles the bill record from the form
    /// values and the captured receipt reference, runs the update step,
    /// and navigates to the bills listing.
    ///
    /// Navigation is unconditional: a rejected update is reported in the
    /// outcome but never blocks it.
    ///
    /// # Errors
    /// Returns an error when no connected user can be read from the
    /// session; the record cannot be assembled without an email.
    pub async fn handle_submit(&mut self, form: BillForm) -> Result<SubmitOutcome, NewBillError> {
        let employee = self
            .session
            .current_user()?
            .ok_or(NewBillError::NoSession)?;

        let mut bill = Bill::new(
            employee.email(),
            form.expense_type,
            form.name.clone(),
            form.amount_value(),
            form.date.clone(),
            form.vat.clone(),
            form.pct_value(),
            form.commentary.clone(),
        );
        if let (Some(url), Some(name)) = (&self.file_url, &self.file_name) {
            bill = bill.with_receipt(url.clone(), name.clone());
        }

        let update = self.update_bill(&bill).await;

        self.navigation.navigate(Route::Bills);

        Ok(SubmitOutcome { bill, update })
    }

    async fn update_bill(&self, bill: &Bill) -> UpdateOutcome {
        let Some(store) = &self.store else {
            return UpdateOutcome::NoStore;
        };
        let Some(selector) = &self.bill_id else {
            warn!("Submitting without an uploaded receipt, skipping store update");
            return UpdateOutcome::NoReceipt;
        };

        match store.update_bill(bill, selector).await {
            Ok(updated) => {
                info!(selector = %selector, "Bill updated");
                UpdateOutcome::Updated(updated)
            }
            Err(e) => {
                error!(error = %e, selector = %selector, "Bill update failed");
                UpdateOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::entities::ExpenseType;
    use crate::domain::ports::mocks::{MockBillStore, MockNavigation, MockSession};

    fn make_container(
        store: Option<Arc<MockBillStore>>,
    ) -> (NewBillContainer, Arc<MockNavigation>) {
        let navigation = Arc::new(MockNavigation::new());
        let container = NewBillContainer::new(
            store.map(|s| s as Arc<dyn BillStorePort>),
            Arc::new(MockSession::with_user("a@a")),
            navigation.clone(),
        );
        (container, navigation)
    }

    fn taxi_form() -> BillForm {
        BillForm {
            expense_type: ExpenseType::Transports,
            name: "Taxi".to_string(),
            amount: "42".to_string(),
            date: "2023-01-01".to_string(),
            vat: "10".to_string(),
            pct: String::new(),
            commentary: "ok".to_string(),
        }
    }

    #[test_case("test.png" ; "png")]
    #[test_case("test.jpg" ; "jpg")]
    #[test_case("test.JPEG" ; "uppercase jpeg")]
    #[tokio::test]
    async fn test_change_file_uploads_accepted_formats(value: &str) {
        let store = Arc::new(MockBillStore::new("https://x", "47qA"));
        let (mut container, _) = make_container(Some(store.clone()));

        let receipt = container
            .handle_change_file(value, b"bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(store.create_calls(), 1);
        assert_eq!(receipt.file_url, "https://x");
        assert_eq!(container.file_name(), Some(value));
        assert_eq!(container.bill_id(), Some(&BillKey::from("47qA")));
    }

    #[test_case("test.pdf" ; "pdf")]
    #[test_case("note.txt" ; "txt")]
    #[tokio::test]
    async fn test_change_file_rejects_other_formats_without_store_call(value: &str) {
        let store = Arc::new(MockBillStore::new("https://x", "47qA"));
        let (mut container, _) = make_container(Some(store.clone()));

        let result = container.handle_change_file(value, b"bytes".to_vec()).await;

        assert!(matches!(
            result,
            Err(NewBillError::Receipt(ReceiptError::UnsupportedFormat { .. }))
        ));
        assert_eq!(store.create_calls(), 0);
        assert_eq!(container.file_name(), None);
        assert_eq!(container.bill_id(), None);
    }

    #[tokio::test]
    async fn test_change_file_sends_email_with_file() {
        let store = Arc::new(MockBillStore::new("https://x", "47qA"));
        let (mut container, _) = make_container(Some(store.clone()));

        container
            .handle_change_file(r"C:\fakepath\taxi.png", b"bytes".to_vec())
            .await
            .unwrap();

        let creates = store.recorded_creates();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].email, "a@a");
        assert_eq!(creates[0].file_name, "taxi.png");
        assert_eq!(creates[0].bytes, b"bytes");
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_state_unchanged() {
        let store = Arc::new(MockBillStore::new("https://x", "47qA").failing_create());
        let (mut container, _) = make_container(Some(store.clone()));

        let result = container
            .handle_change_file("test.png", b"bytes".to_vec())
            .await;

        assert!(matches!(result, Err(NewBillError::Store(_))));
        assert_eq!(store.create_calls(), 1);
        assert_eq!(container.file_url(), None);
        assert_eq!(container.file_name(), None);
        assert_eq!(container.bill_id(), None);
    }

    #[tokio::test]
    async fn test_submit_correlates_update_with_created_key() {
        let store = Arc::new(MockBillStore::new("https://x", "47qA"));
        let (mut container, navigation) = make_container(Some(store.clone()));

        container
            .handle_change_file("test.png", b"bytes".to_vec())
            .await
            .unwrap();
        let outcome = container.handle_submit(taxi_form()).await.unwrap();

        assert_eq!(outcome.bill.email(), "a@a");
        assert_eq!(outcome.bill.expense_type(), ExpenseType::Transports);
        assert_eq!(outcome.bill.name(), "Taxi");
        assert_eq!(outcome.bill.amount(), 42);
        assert_eq!(outcome.bill.date(), "2023-01-01");
        assert_eq!(outcome.bill.vat(), "10");
        assert_eq!(outcome.bill.pct(), 20);
        assert_eq!(outcome.bill.commentary(), "ok");
        assert_eq!(outcome.bill.file_url(), Some("https://x"));
        assert_eq!(outcome.bill.file_name(), Some("test.png"));
        assert_eq!(outcome.bill.status().label(), "En attente");

        let updates = store.recorded_updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1, BillKey::from("47qA"));
        assert!(matches!(outcome.update, UpdateOutcome::Updated(_)));

        assert_eq!(navigation.recorded(), vec![Route::Bills]);
    }

    #[tokio::test]
    async fn test_submit_navigates_even_when_update_fails() {
        let store = Arc::new(MockBillStore::new("https://x", "47qA").failing_update());
        let (mut container, navigation) = make_container(Some(store.clone()));

        container
            .handle_change_file("test.png", b"bytes".to_vec())
            .await
            .unwrap();
        let outcome = container.handle_submit(taxi_form()).await.unwrap();

        assert!(matches!(outcome.update, UpdateOutcome::Failed(_)));
        assert_eq!(navigation.recorded(), vec![Route::Bills]);
    }

    #[tokio::test]
    async fn test_submit_without_upload_skips_update_and_navigates() {
        let store = Arc::new(MockBillStore::new("https://x", "47qA"));
        let (mut container, navigation) = make_container(Some(store.clone()));

        let outcome = container.handle_submit(taxi_form()).await.unwrap();

        assert!(matches!(outcome.update, UpdateOutcome::NoReceipt));
        assert_eq!(outcome.bill.file_url(), None);
        assert_eq!(outcome.bill.file_name(), None);
        assert!(store.recorded_updates().is_empty());
        assert_eq!(navigation.recorded(), vec![Route::Bills]);
    }

    #[tokio::test]
    async fn test_submit_without_store_is_a_no_op_update() {
        let (mut container, navigation) = make_container(None);

        let outcome = container.handle_submit(taxi_form()).await.unwrap();

        assert!(matches!(outcome.update, UpdateOutcome::NoStore));
        assert_eq!(navigation.recorded(), vec![Route::Bills]);
    }

    #[tokio::test]
    async fn test_submit_without_session_fails() {
        let navigation = Arc::new(MockNavigation::new());
        let mut container = NewBillContainer::new(
            None,
            Arc::new(MockSession::new()),
            navigation.clone(),
        );

        let result = container.handle_submit(taxi_form()).await;

        assert!(matches!(result, Err(NewBillError::NoSession)));
        assert!(navigation.recorded().is_empty());
    }
}
