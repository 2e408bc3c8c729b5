//! Payment endpoints.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::Money;
use payment::{Payment, PaymentId, PaymentRequest, PaymentService, PaymentStatistics};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::ApiJson;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub order_id: String,
    pub amount: f64,
    #[serde(default)]
    pub customer_id: String,
    pub payment_method: Option<String>,
}

#[derive(Deserialize)]
pub struct FailureRateRequest {
    pub rate: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRateResponse {
    pub failure_rate: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub payment_id: String,
    pub order_id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: String,
    pub payment_method: String,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            payment_id: payment.payment_id.to_string(),
            order_id: payment.order_id.to_string(),
            customer_id: payment.customer_id.to_string(),
            amount: payment.amount.as_decimal(),
            status: payment.status.to_string(),
            payment_method: payment.payment_method,
            failure_reason: payment.failure_reason.map(|r| r.to_string()),
            created_at: payment.created_at,
            processed_at: payment.processed_at,
        }
    }
}

/// POST /payment/process — charge a customer; answers whether it went through.
#[tracing::instrument(skip(payment, req), fields(order_id = %req.order_id))]
pub async fn process(
    State(payment): State<PaymentService>,
    ApiJson(req): ApiJson<ProcessPaymentRequest>,
) -> Result<Json<bool>, ApiError> {
    let order_id: OrderId = req
        .order_id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid orderId: {e}")))?;
    let amount = Money::from_decimal(req.amount)
        .filter(|m| !m.is_negative())
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid amount: {}", req.amount)))?;

    let mut request = PaymentRequest::new(order_id, req.customer_id, amount);
    if let Some(method) = req.payment_method {
        request = request.with_method(method);
    }

    Ok(Json(payment.process_payment(request).await))
}

/// GET /payment/{paymentId}
pub async fn get(
    State(payment): State<PaymentService>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment_id: PaymentId = id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Payment not found: {id}")))?;
    let found = payment.get_payment(payment_id).await?;
    Ok(Json(found.into()))
}

/// GET /payment/order/{orderId} — the most recent attempt for an order.
pub async fn get_by_order(
    State(payment): State<PaymentService>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let order_id: OrderId = id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Payment not found for order: {id}")))?;
    let found = payment.get_payment_by_order(order_id).await?;
    Ok(Json(found.into()))
}

/// POST /payment/{paymentId}/refund
#[tracing::instrument(skip(payment))]
pub async fn refund(
    State(payment): State<PaymentService>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment_id: PaymentId = id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Payment not found: {id}")))?;
    let refunded = payment.refund(payment_id).await?;
    Ok(Json(refunded.into()))
}

/// GET /payment/config/failure-rate
pub async fn get_failure_rate(State(payment): State<PaymentService>) -> Json<FailureRateResponse> {
    Json(FailureRateResponse {
        failure_rate: payment.failure_rate(),
    })
}

/// PUT /payment/config/failure-rate — body `{"rate": r}` with `r` in `[0, 1]`.
pub async fn set_failure_rate(
    State(payment): State<PaymentService>,
    ApiJson(req): ApiJson<FailureRateRequest>,
) -> Result<Json<FailureRateResponse>, ApiError> {
    payment.set_failure_rate(req.rate)?;
    Ok(Json(FailureRateResponse {
        failure_rate: payment.failure_rate(),
    }))
}

/// GET /payment/statistics
pub async fn statistics(State(payment): State<PaymentService>) -> Json<PaymentStatistics> {
    Json(payment.statistics().await)
}
