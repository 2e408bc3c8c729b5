//! Payment error types.

use common::OrderId;
use thiserror::Error;

use crate::payment::{PaymentId, PaymentStatus};

/// Errors that can occur during payment operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// No payment exists with this ID.
    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    /// No payment has been attempted for this order.
    #[error("Payment not found for order: {0}")]
    OrderPaymentNotFound(OrderId),

    /// Only completed payments can be refunded.
    #[error("Can only refund completed payments (payment {payment_id} is {status})")]
    NotRefundable {
        payment_id: PaymentId,
        status: PaymentStatus,
    },

    /// Failure rate must be a probability.
    #[error("Failure rate must be between 0 and 1, got {0}")]
    InvalidFailureRate(f64),
}

/// Convenience type alias for payment results.
pub type Result<T> = std::result::Result<T, PaymentError>;
