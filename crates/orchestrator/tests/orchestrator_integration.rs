//! Integration tests driving the orchestrator against the real inventory and
//! payment services.

use std::time::Duration;

use domain::{CreateOrder, Money, OrderStatus, ProductId};
use futures_util::future::join_all;
use inventory::{InventoryItem, InventoryService};
use order_store::InMemoryOrderStore;
use orchestrator::{OrchestratorConfig, OrderOrchestrator};
use payment::{FailureRate, PaymentConfig, PaymentService, PaymentStatus};

type TestOrchestrator = OrderOrchestrator<InMemoryOrderStore, InventoryService, PaymentService>;

struct TestHarness {
    orchestrator: TestOrchestrator,
    inventory: InventoryService,
    payment: PaymentService,
    failure_rate: FailureRate,
}

impl TestHarness {
    fn new(processing_time: Duration, config: OrchestratorConfig) -> Self {
        let inventory = InventoryService::with_items([
            InventoryItem::new("p1", "Laptop", 20),
            InventoryItem::new("p2", "Mouse", 3),
        ]);
        let failure_rate = FailureRate::never();
        let payment = PaymentService::new(PaymentConfig { processing_time }, failure_rate.clone());

        let orchestrator = OrderOrchestrator::new(
            InMemoryOrderStore::new(),
            inventory.clone(),
            payment.clone(),
            config,
        );

        Self {
            orchestrator,
            inventory,
            payment,
            failure_rate,
        }
    }

    fn instant() -> Self {
        Self::new(Duration::ZERO, OrchestratorConfig::default())
    }
}

#[tokio::test]
async fn test_worked_example_completes() {
    let h = TestHarness::instant();

    let cmd = CreateOrder::new("c1", "p1", 5, Money::from_decimal(100.0).unwrap());
    let order = h.orchestrator.create_order(cmd).await.unwrap();

    assert_eq!(order.status(), OrderStatus::Completed);
    assert_eq!(order.total_amount().as_decimal(), 100.0);
    assert_eq!(order.message(), "Order completed successfully");

    let payment = h.payment.get_payment_by_order(order.id()).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Completed);
    assert_eq!(payment.amount, Money::from_cents(10000));
}

#[tokio::test]
async fn test_fifty_orders_complete_with_zero_failure_rate() {
    let h = TestHarness::instant();
    h.failure_rate.set(0.0).unwrap();

    for _ in 0..50 {
        let cmd = CreateOrder::new("c1", "p1", 1, Money::from_cents(999));
        let order = h.orchestrator.create_order(cmd).await.unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    let stats = h.payment.statistics().await;
    assert_eq!(stats.successful_payments, 50);
}

#[tokio::test]
async fn test_fifty_orders_fail_with_full_failure_rate() {
    let h = TestHarness::instant();
    h.failure_rate.set(1.0).unwrap();

    for _ in 0..50 {
        let cmd = CreateOrder::new("c1", "p1", 1, Money::from_cents(999));
        let order = h.orchestrator.create_order(cmd).await.unwrap();
        assert_eq!(order.status(), OrderStatus::Failed);
        assert_eq!(order.failure_reason(), Some("Payment declined"));
    }

    let stats = h.payment.statistics().await;
    assert_eq!(stats.failed_payments, 50);
}

#[tokio::test]
async fn test_insufficient_stock_never_charges() {
    let h = TestHarness::instant();

    let cmd = CreateOrder::new("c1", "p2", 4, Money::from_cents(4000));
    let order = h.orchestrator.create_order(cmd).await.unwrap();

    assert_eq!(order.status(), OrderStatus::Failed);
    assert_eq!(h.payment.statistics().await.total_payments, 0);
}

#[tokio::test]
async fn test_unknown_product_fails() {
    let h = TestHarness::instant();

    let cmd = CreateOrder::new("c1", "ghost", 1, Money::from_cents(100));
    let order = h.orchestrator.create_order(cmd).await.unwrap();

    assert_eq!(order.status(), OrderStatus::Failed);
    assert_eq!(order.failure_reason(), Some("Insufficient inventory"));
}

#[tokio::test]
async fn test_availability_check_does_not_reserve_stock() {
    let h = TestHarness::instant();

    let cmd = CreateOrder::new("c1", "p2", 3, Money::from_cents(3000));
    h.orchestrator.create_order(cmd).await.unwrap();

    let item = h.inventory.get(&ProductId::new("p2")).await.unwrap();
    assert_eq!(item.quantity, 3);
    assert_eq!(item.available_quantity, 3);
}

#[tokio::test(start_paused = true)]
async fn test_slow_payment_times_out_and_fails() {
    let config = OrchestratorConfig::default().with_payment_timeout(Duration::from_millis(200));
    let h = TestHarness::new(Duration::from_secs(2), config);

    let cmd = CreateOrder::new("c1", "p1", 1, Money::from_cents(100));
    let order = h.orchestrator.create_order(cmd).await.unwrap();

    assert_eq!(order.status(), OrderStatus::Failed);
    assert_eq!(
        order.failure_reason(),
        Some("Payment service unavailable: timed out after 200ms")
    );

    // The abandoned attempt is left where it was when the call was dropped
    let payment = h.payment.get_payment_by_order(order.id()).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Processing);
}

#[tokio::test]
async fn test_concurrent_orders_are_independent() {
    let h = TestHarness::instant();

    let creations = (0..20).map(|i| {
        let cmd = CreateOrder::new(format!("c{i}"), "p1", 1, Money::from_cents(100));
        h.orchestrator.create_order(cmd)
    });
    let orders: Vec<_> = join_all(creations)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();

    assert!(orders.iter().all(|o| o.status() == OrderStatus::Completed));
    assert_eq!(h.orchestrator.list_orders().await.unwrap().len(), 20);
}
