//! Payment service for the order-fulfillment pipeline.
//!
//! Simulates a payment processor: each attempt waits out a processing delay
//! and then fails with a configurable probability, drawing the failure
//! reason from a fixed taxonomy. The failure rate lives in a shared
//! [`FailureRate`] cell handed to the service at construction.

pub mod error;
pub mod failure_rate;
pub mod payment;
pub mod service;

pub use error::PaymentError;
pub use failure_rate::FailureRate;
pub use payment::{FailureReason, Payment, PaymentId, PaymentRequest, PaymentStatus};
pub use service::{PaymentConfig, PaymentService, PaymentStatistics};
