//! Expense-service HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, multipart};
use tracing::{debug, warn};

use super::dto::{CreateBillResponse, ErrorResponse};
use crate::domain::entities::{Bill, BillKey};
use crate::domain::errors::StoreError;
use crate::domain::ports::{BillStorePort, CreateBillRequest, CreatedBill};

const DEFAULT_API_BASE: &str = "http://localhost:5678";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP adapter for the resource-scoped bill store.
pub struct BillApiClient {
    client: Client,
    base_url: String,
}

impl BillApiClient {
    /// Creates a new client against the default base URL.
    ///
    /// # Errors
    /// Returns an error if HTTP client creation fails.
    pub fn new() -> Result<Self, StoreError> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    /// Returns an error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn bills_url(&self) -> String {
        format!("{}/bills", self.base_url)
    }

    fn map_request_error(e: &reqwest::Error) -> StoreError {
        warn!(error = %e, "Failed to reach the expense service");
        if e.is_timeout() {
            StoreError::network("request timed out")
        } else if e.is_connect() {
            StoreError::network("failed to connect to the expense service")
        } else {
            StoreError::network(e.to_string())
        }
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> StoreError {
        let message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.message,
            Err(_) => format!("HTTP {status}"),
        };
        StoreError::rejected(status.as_u16(), message)
    }
}

#[async_trait]
impl BillStorePort for BillApiClient {
    async fn create_bill(&self, request: CreateBillRequest) -> Result<CreatedBill, StoreError> {
        debug!(file = %request.file_name, "Creating bill from receipt");

        // The file part carries no explicit content type; the service
        // sniffs the upload itself.
        let part = multipart::Part::bytes(request.bytes).file_name(request.file_name);
        let form = multipart::Form::new()
            .part("file", part)
            .text("email", request.email);

        let response = self
            .client
            .post(self.bills_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::map_request_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let created: CreateBillResponse = response
            .json()
            .await
            .map_err(|e| StoreError::decode(format!("create response: {e}")))?;

        debug!(key = %created.key, "Bill created");

        Ok(CreatedBill {
            file_url: created.file_url,
            key: BillKey::new(created.key),
        })
    }

    async fn update_bill(&self, bill: &Bill, selector: &BillKey) -> Result<Bill, StoreError> {
        debug!(selector = %selector, "Updating bill");

        let response = self
            .client
            .patch(format!("{}/{}", self.bills_url(), selector))
            .json(bill)
            .send()
            .await
            .map_err(|e| Self::map_request_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::decode(format!("update response: {e}")))
    }

    async fn list_bills(&self) -> Result<Vec<Bill>, StoreError> {
        debug!("Fetching bills");

        let response = self
            .client
            .get(self.bills_url())
            .send()
            .await
            .map_err(|e| Self::map_request_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::decode(format!("listing response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        tokio_test::assert_ok!(BillApiClient::new(),);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BillApiClient::with_base_url("http://billable.test/").unwrap();
        assert_eq!(client.bills_url(), "http://billable.test/bills");
    }
}
