//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use inventory::InventoryError;
use orchestrator::OrchestratorError;
use payment::PaymentError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Order orchestration error.
    Orchestrator(OrchestratorError),
    /// Inventory service error.
    Inventory(InventoryError),
    /// Payment service error.
    Payment(PaymentError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Orchestrator(err) => orchestrator_error_to_response(err),
            ApiError::Inventory(err) => inventory_error_to_response(err),
            ApiError::Payment(err) => payment_error_to_response(err),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "internal server error");
        }

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn orchestrator_error_to_response(err: OrchestratorError) -> (StatusCode, String) {
    match &err {
        OrchestratorError::OrderNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        OrchestratorError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        OrchestratorError::InvalidState(_) => (StatusCode::CONFLICT, err.to_string()),
        OrchestratorError::Store(_) | OrchestratorError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn inventory_error_to_response(err: InventoryError) -> (StatusCode, String) {
    match &err {
        InventoryError::ProductNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        InventoryError::InsufficientStock { .. } => (StatusCode::CONFLICT, err.to_string()),
        InventoryError::QuantityOverflow(_) => (StatusCode::BAD_REQUEST, err.to_string()),
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, String) {
    match &err {
        PaymentError::PaymentNotFound(_) | PaymentError::OrderPaymentNotFound(_) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        PaymentError::NotRefundable { .. } => (StatusCode::CONFLICT, err.to_string()),
        PaymentError::InvalidFailureRate(_) => (StatusCode::BAD_REQUEST, err.to_string()),
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        ApiError::Orchestrator(err)
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        ApiError::Inventory(err)
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError::Payment(err)
    }
}
