//! Order orchestration for the order-fulfillment pipeline.
//!
//! Every order runs through two downstream steps, strictly in sequence:
//! 1. Check inventory availability
//! 2. Process payment
//!
//! Each step is bounded by its own timeout. Transport errors, timeouts and
//! rejections all end the order in `FAILED`; they never surface as errors
//! from [`OrderOrchestrator::create_order`]. There is no compensation: a
//! failed payment does not give the inventory check back.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod steps;

pub use collaborators::{
    CollaboratorError, HttpInventoryClient, HttpPaymentClient, InventoryClient, PaymentClient,
};
pub use config::OrchestratorConfig;
pub use error::OrchestratorError;
pub use orchestrator::OrderOrchestrator;
pub use outcome::StepOutcome;
