//! Orchestrator error types.

use common::OrderId;
use domain::OrderError;
use order_store::StoreError;
use thiserror::Error;

/// Errors surfaced by orchestrator operations.
///
/// Downstream failures are not in here: they end the order in `FAILED`.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// No order exists with this ID.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The creation input was rejected.
    #[error("{0}")]
    Validation(OrderError),

    /// The order's status does not allow the operation.
    #[error("{0}")]
    InvalidState(OrderError),

    /// Order store error.
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),

    /// Unexpected fault while processing an order.
    #[error("Order processing error: {0}")]
    Internal(String),
}

impl From<OrderError> for OrchestratorError {
    fn from(err: OrderError) -> Self {
        if err.is_validation() {
            OrchestratorError::Validation(err)
        } else {
            OrchestratorError::InvalidState(err)
        }
    }
}

/// Convenience type alias for orchestrator results.
pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use domain::OrderStatus;

    #[test]
    fn test_order_errors_split_by_kind() {
        let validation: OrchestratorError = OrderError::InvalidQuantity { quantity: 0 }.into();
        assert!(matches!(validation, OrchestratorError::Validation(_)));

        let state: OrchestratorError = OrderError::CannotCancelCompleted.into();
        assert!(matches!(state, OrchestratorError::InvalidState(_)));
        assert_eq!(state.to_string(), "Cannot cancel a completed order");

        let transition: OrchestratorError = OrderError::InvalidStateTransition {
            current_state: OrderStatus::Failed,
            action: "complete",
        }
        .into();
        assert!(matches!(transition, OrchestratorError::InvalidState(_)));
    }
}
