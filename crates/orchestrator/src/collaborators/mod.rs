//! Downstream collaborators the orchestrator calls during processing.
//!
//! Both seams answer a single yes/no question. Implementations exist for the
//! in-process services and for the same services reached over HTTP.

mod http;
mod in_process;

use std::sync::Arc;

use async_trait::async_trait;
use domain::ProductId;
use payment::PaymentRequest;
use thiserror::Error;

pub use http::{HttpInventoryClient, HttpPaymentClient};

/// A collaborator call that produced no usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// The request never completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The collaborator answered with a non-2xx status.
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),

    /// The response body was not the expected boolean.
    #[error("undecodable response: {0}")]
    Decode(String),

    /// The configured base URL cannot address the collaborator.
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
}

/// Answers whether a product is available in the requested quantity.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    async fn check_availability(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, CollaboratorError>;
}

/// Charges a customer for an order and reports whether it went through.
#[async_trait]
pub trait PaymentClient: Send + Sync {
    async fn process_payment(&self, request: PaymentRequest) -> Result<bool, CollaboratorError>;
}

#[async_trait]
impl<T: InventoryClient + ?Sized> InventoryClient for Arc<T> {
    async fn check_availability(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, CollaboratorError> {
        (**self).check_availability(product_id, quantity).await
    }
}

#[async_trait]
impl<T: PaymentClient + ?Sized> PaymentClient for Arc<T> {
    async fn process_payment(&self, request: PaymentRequest) -> Result<bool, CollaboratorError> {
        (**self).process_payment(request).await
    }
}
