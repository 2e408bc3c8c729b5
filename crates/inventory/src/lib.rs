//! Inventory service for the order-fulfillment pipeline.
//!
//! Keeps an on-hand and reserved quantity per product and answers the
//! orchestrator's one question: is the requested quantity available?
//! Available quantity is always derived as on-hand minus reserved.

pub mod error;
pub mod item;
pub mod service;

pub use error::InventoryError;
pub use item::{CRITICAL_STOCK_THRESHOLD, InventoryItem};
pub use service::InventoryService;
