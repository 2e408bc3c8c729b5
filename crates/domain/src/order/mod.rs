//! Order record and related types.

mod aggregate;
mod commands;
mod state;
mod value_objects;

pub use aggregate::{Order, OrderRecord};
pub use commands::CreateOrder;
pub use state::{OrderStatus, UnknownStatus};
pub use value_objects::{CustomerId, Money, ProductId};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Customer ID is required.
    #[error("Customer ID is required")]
    CustomerIdRequired,

    /// Product ID is required.
    #[error("Product ID is required")]
    ProductIdRequired,

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Invalid total amount.
    #[error("Invalid total amount: {amount} (must not be negative)")]
    InvalidAmount { amount: Money },

    /// Order is not in the expected state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: OrderStatus,
        action: &'static str,
    },

    /// Completed orders are final.
    #[error("Cannot cancel a completed order")]
    CannotCancelCompleted,
}

impl OrderError {
    /// Returns true if the error was caused by invalid input rather than
    /// by the order's current state.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OrderError::CustomerIdRequired
                | OrderError::ProductIdRequired
                | OrderError::InvalidQuantity { .. }
                | OrderError::InvalidAmount { .. }
        )
    }
}
