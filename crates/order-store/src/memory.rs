use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::Order;
use tokio::sync::RwLock;

use crate::{OrderId, Result, StoreError, Version, store::OrderStore};

/// In-memory order store.
///
/// Backs the default deployment and the test suites, and provides the
/// same guarantees as the PostgreSQL implementation: a single write lock
/// serializes inserts and version-checked updates.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: &Order) -> Result<Version> {
        let mut orders = self.orders.write().await;

        if orders.contains_key(&order.id()) {
            return Err(StoreError::DuplicateOrder(order.id()));
        }

        let version = Version::first();
        let mut stored = order.clone();
        stored.mark_persisted(version);
        orders.insert(order.id(), stored);

        metrics::counter!("order_store_writes_total", "op" => "insert").increment(1);
        Ok(version)
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&order_id).cloned())
    }

    async fn update(&self, order: &Order) -> Result<Version> {
        let mut orders = self.orders.write().await;

        let stored = orders
            .get_mut(&order.id())
            .ok_or(StoreError::OrderNotFound(order.id()))?;

        if stored.version() != order.version() {
            return Err(StoreError::ConcurrencyConflict {
                order_id: order.id(),
                expected: order.version(),
                actual: stored.version(),
            });
        }

        let version = order.version().next();
        *stored = order.clone();
        stored.mark_persisted(version);

        metrics::counter!("order_store_writes_total", "op" => "update").increment(1);
        Ok(version)
    }

    async fn list(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut all: Vec<_> = orders.values().cloned().collect();
        all.sort_by_key(|o| (o.created_at(), o.id().as_uuid()));
        Ok(all)
    }
}
