//! Response types for the payroll invoice API.
//!
//! This module defines the JSON bodies returned by the endpoints and the
//! mapping from [`InvoiceError`] to HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::InvoiceError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates an invalid query error response.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new("INVALID_QUERY", message)
    }
}

/// Body of `POST /sheets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsResponse {
    /// Sheet names in workbook order.
    pub sheets: Vec<String>,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<InvoiceError> for ApiErrorResponse {
    fn from(error: InvoiceError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            InvoiceError::ConfigNotFound { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            InvoiceError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration parse error", message),
            ),
            InvoiceError::WorkbookUnreadable { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "WORKBOOK_UNREADABLE",
                    message,
                    "The request body must be an xlsx, xlsm, xlsb, xls or ods workbook",
                ),
            ),
            InvoiceError::SheetNotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("SHEET_NOT_FOUND", message))
            }
            InvoiceError::HeaderRowNotFound { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("HEADER_ROW_NOT_FOUND", message),
            ),
            InvoiceError::UnresolvedRequiredColumn { tried, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "COST_CENTER_NOT_FOUND",
                    message,
                    format!("Expected one of: {tried}"),
                ),
            ),
            InvoiceError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", message))
            }
            InvoiceError::InvoiceGeneration { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INVOICE_GENERATION_FAILED", message),
            ),
            InvoiceError::Export { format, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("EXPORT_FAILED", message, format),
            ),
        };

        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (InvoiceError::Unauthorized, StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (
                InvoiceError::WorkbookUnreadable {
                    message: "bad zip".into(),
                },
                StatusCode::BAD_REQUEST,
                "WORKBOOK_UNREADABLE",
            ),
            (
                InvoiceError::SheetNotFound {
                    sheet: "Feb".into(),
                },
                StatusCode::NOT_FOUND,
                "SHEET_NOT_FOUND",
            ),
            (
                InvoiceError::HeaderRowNotFound {
                    sheet: "Feb".into(),
                    marker: "No.".into(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
                "HEADER_ROW_NOT_FOUND",
            ),
            (
                InvoiceError::UnresolvedRequiredColumn {
                    canonical: "Cost Center".into(),
                    tried: "C/Center".into(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
                "COST_CENTER_NOT_FOUND",
            ),
            (
                InvoiceError::InvoiceGeneration {
                    message: "overflow".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVOICE_GENERATION_FAILED",
            ),
            (
                InvoiceError::export("pdf", "font"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "EXPORT_FAILED",
            ),
            (
                InvoiceError::ConfigNotFound {
                    path: "users.yaml".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_cost_center_error_lists_aliases() {
        let response: ApiErrorResponse = InvoiceError::UnresolvedRequiredColumn {
            canonical: "Cost Center".into(),
            tried: "C/Center, Center".into(),
        }
        .into();
        assert_eq!(response.error.message, "Cost Center column not found (tried: C/Center, Center)");
        assert_eq!(
            response.error.details.as_deref(),
            Some("Expected one of: C/Center, Center")
        );
    }
}
