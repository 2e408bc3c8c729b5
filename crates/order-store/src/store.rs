use std::sync::Arc;

use async_trait::async_trait;
use domain::Order;

use crate::{OrderId, Result, Version};

/// Core trait for order store implementations.
///
/// The store owns the persisted view of each order. Writes are guarded by
/// the order's [`Version`]: every successful write moves it forward by one,
/// and a write carrying a stale version is rejected. All implementations
/// must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order.
    ///
    /// Fails with `DuplicateOrder` if the ID is already taken, so two
    /// concurrent creations of the same ID cannot both succeed.
    ///
    /// Returns the version assigned to the stored record.
    async fn insert(&self, order: &Order) -> Result<Version>;

    /// Retrieves an order by ID.
    ///
    /// Returns None if the order doesn't exist.
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Overwrites an existing order.
    ///
    /// `order.version()` must equal the stored version, otherwise the write
    /// fails with `ConcurrencyConflict`. Unknown IDs fail with `OrderNotFound`.
    ///
    /// Returns the new version of the stored record.
    async fn update(&self, order: &Order) -> Result<Version>;

    /// Lists all orders, oldest first.
    async fn list(&self) -> Result<Vec<Order>>;
}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    async fn insert(&self, order: &Order) -> Result<Version> {
        (**self).insert(order).await
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        (**self).get(order_id).await
    }

    async fn update(&self, order: &Order) -> Result<Version> {
        (**self).update(order).await
    }

    async fn list(&self) -> Result<Vec<Order>> {
        (**self).list().await
    }
}

/// Extension trait providing convenience methods for order stores.
#[async_trait]
pub trait OrderStoreExt: OrderStore {
    /// Inserts or updates the order depending on whether it has been
    /// persisted before, then records the new version on it.
    async fn save(&self, order: &mut Order) -> Result<Version> {
        let version = if order.version() == Version::initial() {
            self.insert(order).await?
        } else {
            self.update(order).await?
        };
        order.mark_persisted(version);
        Ok(version)
    }

    /// Checks if an order exists.
    async fn exists(&self, order_id: OrderId) -> Result<bool> {
        Ok(self.get(order_id).await?.is_some())
    }
}

// Blanket implementation for all OrderStore implementations
impl<T: OrderStore + ?Sized> OrderStoreExt for T {}
