//! Domain layer for the order-fulfillment services.
//!
//! This crate provides the core domain types:
//! - `Order` record with a monotonic status state machine
//! - `CreateOrder` command with input validation
//! - Value objects shared with the inventory and payment collaborators

pub mod order;

pub use order::{
    CreateOrder, CustomerId, Money, Order, OrderError, OrderRecord, OrderStatus, ProductId,
};
