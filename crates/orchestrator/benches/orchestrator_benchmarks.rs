use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use domain::{CreateOrder, Money};
use inventory::{InventoryItem, InventoryService};
use order_store::InMemoryOrderStore;
use orchestrator::{OrchestratorConfig, OrderOrchestrator};
use payment::{FailureRate, PaymentConfig, PaymentService};

fn orchestrator(
    failure_rate: f64,
) -> OrderOrchestrator<InMemoryOrderStore, InventoryService, PaymentService> {
    let inventory = InventoryService::with_items([InventoryItem::new("p1", "Widget", u32::MAX)]);
    let payment = PaymentService::new(
        PaymentConfig {
            processing_time: Duration::ZERO,
        },
        FailureRate::new(failure_rate).unwrap(),
    );
    OrderOrchestrator::new(
        InMemoryOrderStore::new(),
        inventory,
        payment,
        OrchestratorConfig::default(),
    )
}

fn bench_create_order_completed(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orch = orchestrator(0.0);

    c.bench_function("orchestrator/create_order_completed", |b| {
        b.iter(|| {
            rt.block_on(async {
                let cmd = CreateOrder::new("c1", "p1", 1, Money::from_cents(1000));
                orch.create_order(cmd).await.unwrap();
            });
        });
    });
}

fn bench_create_order_rejected(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orch = orchestrator(0.0);

    c.bench_function("orchestrator/create_order_out_of_stock", |b| {
        b.iter(|| {
            rt.block_on(async {
                let cmd = CreateOrder::new("c1", "unknown", 1, Money::from_cents(1000));
                orch.create_order(cmd).await.unwrap();
            });
        });
    });
}

fn bench_create_order_payment_failed(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orch = orchestrator(1.0);

    c.bench_function("orchestrator/create_order_payment_failed", |b| {
        b.iter(|| {
            rt.block_on(async {
                let cmd = CreateOrder::new("c1", "p1", 1, Money::from_cents(1000));
                orch.create_order(cmd).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_create_order_completed,
    bench_create_order_rejected,
    bench_create_order_payment_failed
);
criterion_main!(benches);
