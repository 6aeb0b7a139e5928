//! Wire DTOs for the expense-service API.

use serde::Deserialize;

/// Response of the receipt-create endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillResponse {
    /// Location of the stored receipt file.
    pub file_url: String,
    /// Store-issued record key.
    pub key: String,
}

/// Error body the service attaches to non-success responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_response_wire_names() {
        let json = r#"{"fileUrl": "https://test.storage.tld/receipt.png", "key": "47qAXb6fIm2zOKkLzMro"}"#;
        let response: CreateBillResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.file_url, "https://test.storage.tld/receipt.png");
        assert_eq!(response.key, "47qAXb6fIm2zOKkLzMro");
    }

    #[test]
    fn test_error_response() {
        let response: ErrorResponse =
            serde_json::from_str(r#"{"message": "Erreur 404"}"#).unwrap();
        assert_eq!(response.message, "Erreur 404");
    }
}
