//! Inventory error types.

use domain::ProductId;
use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// No stock record exists for the product.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The change would take on-hand stock below zero.
    #[error("Cannot decrease stock below zero for {product_id}: on hand {on_hand}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        on_hand: u32,
        requested: u32,
    },

    /// The change would overflow the on-hand counter.
    #[error("Stock quantity overflow for {0}")]
    QuantityOverflow(ProductId),
}

/// Convenience type alias for inventory results.
pub type Result<T> = std::result::Result<T, InventoryError>;
