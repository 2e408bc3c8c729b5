//! Health check endpoints.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health — returns system health status.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /orders/health
pub async fn orders() -> &'static str {
    "Order Service is healthy!"
}

/// GET /inventory/health
pub async fn inventory() -> &'static str {
    "Inventory Service is healthy!"
}

/// GET /payment/health
pub async fn payment() -> &'static str {
    "Payment Service is healthy!"
}
