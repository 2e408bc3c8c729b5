//! Inventory endpoints.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use domain::ProductId;
use inventory::{InventoryItem, InventoryService};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};

#[derive(Deserialize)]
pub struct CheckQuery {
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct QuantityRequest {
    pub quantity: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub reserved_quantity: u32,
    pub available_quantity: i64,
    pub is_critical: bool,
    pub last_updated: DateTime<Utc>,
}

impl From<InventoryItem> for InventoryResponse {
    fn from(item: InventoryItem) -> Self {
        Self {
            is_critical: item.is_critical(),
            product_id: item.product_id.to_string(),
            product_name: item.product_name,
            quantity: item.quantity,
            reserved_quantity: item.reserved_quantity,
            available_quantity: item.available_quantity,
            last_updated: item.last_updated,
        }
    }
}

fn to_responses(items: Vec<InventoryItem>) -> Json<Vec<InventoryResponse>> {
    Json(items.into_iter().map(InventoryResponse::from).collect())
}

/// GET /inventory/check/{productId}?quantity=N — availability as a bare boolean.
pub async fn check(
    State(inventory): State<InventoryService>,
    Path(product_id): Path<String>,
    ApiQuery(query): ApiQuery<CheckQuery>,
) -> Json<bool> {
    let product_id = ProductId::new(product_id);
    Json(inventory.check_availability(&product_id, query.quantity).await)
}

/// GET /inventory — every stock record.
pub async fn list(State(inventory): State<InventoryService>) -> Json<Vec<InventoryResponse>> {
    to_responses(inventory.list_all().await)
}

/// GET /inventory/critical — records with available stock below the threshold.
pub async fn critical(State(inventory): State<InventoryService>) -> Json<Vec<InventoryResponse>> {
    to_responses(inventory.list_critical().await)
}

/// GET /inventory/{productId}
pub async fn get(
    State(inventory): State<InventoryService>,
    Path(product_id): Path<String>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let item = inventory.get(&ProductId::new(product_id)).await?;
    Ok(Json(item.into()))
}

/// PUT /inventory/{productId} — overwrite the on-hand quantity.
#[tracing::instrument(skip(inventory, req))]
pub async fn update(
    State(inventory): State<InventoryService>,
    Path(product_id): Path<String>,
    ApiJson(req): ApiJson<QuantityRequest>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let item = inventory
        .update_quantity(&ProductId::new(product_id), req.quantity)
        .await?;
    Ok(Json(item.into()))
}

/// POST /inventory/{productId}/decrease
#[tracing::instrument(skip(inventory, req))]
pub async fn decrease(
    State(inventory): State<InventoryService>,
    Path(product_id): Path<String>,
    ApiJson(req): ApiJson<QuantityRequest>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let item = inventory
        .decrease_stock(&ProductId::new(product_id), req.quantity)
        .await?;
    Ok(Json(item.into()))
}

/// POST /inventory/{productId}/increase
#[tracing::instrument(skip(inventory, req))]
pub async fn increase(
    State(inventory): State<InventoryService>,
    Path(product_id): Path<String>,
    ApiJson(req): ApiJson<QuantityRequest>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let item = inventory
        .increase_stock(&ProductId::new(product_id), req.quantity)
        .await?;
    Ok(Json(item.into()))
}
