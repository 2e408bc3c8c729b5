//! HTTP API server for the order-fulfillment pipeline.
//!
//! Serves the order, inventory and payment services from one process, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use inventory::{InventoryItem, InventoryService};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::{
    HttpInventoryClient, HttpPaymentClient, InventoryClient, OrderOrchestrator, PaymentClient,
};
use order_store::OrderStore;
use payment::{FailureRate, PaymentService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::ApiError;
use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: OrderStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let inventory_router = Router::new()
        .route("/inventory", get(routes::inventory::list))
        .route("/inventory/health", get(routes::health::inventory))
        .route("/inventory/critical", get(routes::inventory::critical))
        .route(
            "/inventory/check/{product_id}",
            get(routes::inventory::check),
        )
        .route(
            "/inventory/{product_id}",
            get(routes::inventory::get).put(routes::inventory::update),
        )
        .route(
            "/inventory/{product_id}/decrease",
            post(routes::inventory::decrease),
        )
        .route(
            "/inventory/{product_id}/increase",
            post(routes::inventory::increase),
        )
        .with_state(state.inventory.clone());

    let payment_router = Router::new()
        .route("/payment/process", post(routes::payment::process))
        .route("/payment/health", get(routes::health::payment))
        .route("/payment/statistics", get(routes::payment::statistics))
        .route(
            "/payment/config/failure-rate",
            get(routes::payment::get_failure_rate).put(routes::payment::set_failure_rate),
        )
        .route("/payment/order/{order_id}", get(routes::payment::get_by_order))
        .route("/payment/{payment_id}", get(routes::payment::get))
        .route("/payment/{payment_id}/refund", post(routes::payment::refund))
        .with_state(state.payment.clone());

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders/health", get(routes::health::orders))
        .route(
            "/orders",
            post(routes::orders::create::<S>).get(routes::orders::list::<S>),
        )
        .route(
            "/orders/{order_id}",
            get(routes::orders::get::<S>).delete(routes::orders::cancel::<S>),
        )
        .with_state(state)
        .merge(inventory_router)
        .merge(payment_router)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around an order store.
///
/// The orchestrator talks to the in-process inventory and payment services
/// unless the config names remote ones, in which case it calls them over HTTP.
pub fn create_default_state<S: OrderStore + 'static>(
    order_store: S,
    config: &Config,
) -> Result<Arc<AppState<S>>, ApiError> {
    let inventory = InventoryService::with_items(demo_catalog());
    let failure_rate = FailureRate::new(config.payment_failure_rate)?;
    let payment = PaymentService::new(config.payment_config(), failure_rate);

    let inventory_client: Arc<dyn InventoryClient> = match &config.inventory_service_url {
        Some(url) => {
            tracing::info!(%url, "using remote inventory service");
            Arc::new(
                HttpInventoryClient::new(url).map_err(|e| ApiError::Internal(e.to_string()))?,
            )
        }
        None => Arc::new(inventory.clone()),
    };
    let payment_client: Arc<dyn PaymentClient> = match &config.payment_service_url {
        Some(url) => {
            tracing::info!(%url, "using remote payment service");
            Arc::new(HttpPaymentClient::new(url).map_err(|e| ApiError::Internal(e.to_string()))?)
        }
        None => Arc::new(payment.clone()),
    };

    let orchestrator = OrderOrchestrator::new(
        order_store,
        inventory_client,
        payment_client,
        config.orchestrator_config(),
    );

    Ok(Arc::new(AppState {
        orchestrator,
        inventory,
        payment,
    }))
}

/// Stock the in-process inventory service starts with.
pub fn demo_catalog() -> Vec<InventoryItem> {
    vec![
        InventoryItem::new("PROD-001", "Laptop", 50),
        InventoryItem::new("PROD-002", "Wireless Mouse", 200),
        InventoryItem::new("PROD-003", "Mechanical Keyboard", 8),
        InventoryItem::new("PROD-004", "27\" Monitor", 25).with_reserved(5),
    ]
}
