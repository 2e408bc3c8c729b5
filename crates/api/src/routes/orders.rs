//! Order endpoints backed by the orchestrator.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{CreateOrder, Money, Order};
use inventory::InventoryService;
use orchestrator::{InventoryClient, OrderOrchestrator, PaymentClient};
use order_store::OrderStore;
use payment::PaymentService;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::ApiJson;

/// Orchestrator wired to whichever collaborators the deployment chose.
pub type AppOrchestrator<S> =
    OrderOrchestrator<S, Arc<dyn InventoryClient>, Arc<dyn PaymentClient>>;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore> {
    pub orchestrator: AppOrchestrator<S>,
    pub inventory: InventoryService,
    pub payment: PaymentService,
}

// -- Request types --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub product_id: String,
    pub quantity: i64,
    pub total_amount: f64,
}

// -- Response types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: String,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub total_amount: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message: String,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id().to_string(),
            customer_id: order.customer_id().to_string(),
            product_id: order.product_id().to_string(),
            quantity: order.quantity(),
            total_amount: order.total_amount().as_decimal(),
            status: order.status().to_string(),
            failure_reason: order.failure_reason().map(String::from),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
            message: order.message(),
        }
    }
}

// -- Handlers --

/// POST /orders — create an order and run it through inventory and payment.
///
/// Business failures still answer 201 with a `FAILED` order.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let quantity = u32::try_from(req.quantity)
        .map_err(|_| ApiError::BadRequest(format!("Invalid quantity: {}", req.quantity)))?;
    let total_amount = Money::from_decimal(req.total_amount).ok_or_else(|| {
        ApiError::BadRequest(format!("Invalid total amount: {}", req.total_amount))
    })?;

    let cmd = CreateOrder::new(req.customer_id, req.product_id, quantity, total_amount);
    let order = state.orchestrator.create_order(cmd).await?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(&order))))
}

/// GET /orders/{id} — load an order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state.orchestrator.get_order(order_id).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// GET /orders — list every order, oldest first.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.orchestrator.list_orders().await?;
    Ok(Json(orders.iter().map(OrderResponse::from).collect()))
}

/// DELETE /orders/{id} — cancel an order that has not completed.
#[tracing::instrument(skip(state))]
pub async fn cancel<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state.orchestrator.cancel_order(order_id).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// An ID that is not a UUID cannot name a stored order.
fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    id.parse()
        .map_err(|_| ApiError::NotFound(format!("Order not found: {id}")))
}
