//! Adapters calling the inventory and payment services in the same process.

use async_trait::async_trait;
use domain::ProductId;
use inventory::InventoryService;
use payment::{PaymentRequest, PaymentService};

use super::{CollaboratorError, InventoryClient, PaymentClient};

#[async_trait]
impl InventoryClient for InventoryService {
    async fn check_availability(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, CollaboratorError> {
        Ok(InventoryService::check_availability(self, product_id, quantity).await)
    }
}

#[async_trait]
impl PaymentClient for PaymentService {
    async fn process_payment(&self, request: PaymentRequest) -> Result<bool, CollaboratorError> {
        Ok(PaymentService::process_payment(self, request).await)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use common::OrderId;
    use domain::Money;
    use inventory::InventoryItem;
    use payment::{FailureRate, PaymentConfig};

    #[tokio::test]
    async fn test_inventory_adapter_forwards_answer() {
        let service = InventoryService::with_items([InventoryItem::new("p1", "Widget", 20)]);
        let client: &dyn InventoryClient = &service;

        let product = ProductId::new("p1");
        assert_eq!(client.check_availability(&product, 20).await, Ok(true));
        assert_eq!(client.check_availability(&product, 21).await, Ok(false));
        assert_eq!(
            client.check_availability(&ProductId::new("nope"), 1).await,
            Ok(false)
        );
    }

    #[tokio::test]
    async fn test_payment_adapter_forwards_answer() {
        let rate = FailureRate::never();
        let service = PaymentService::new(
            PaymentConfig {
                processing_time: Duration::ZERO,
            },
            rate.clone(),
        );
        let client: &dyn PaymentClient = &service;
        let request = || PaymentRequest::new(OrderId::new(), "c1", Money::from_cents(500));

        assert_eq!(client.process_payment(request()).await, Ok(true));
        rate.set(1.0).unwrap();
        assert_eq!(client.process_payment(request()).await, Ok(false));
    }
}
