//! In-memory inventory ledger.

use std::collections::HashMap;
use std::sync::Arc;

use domain::ProductId;
use tokio::sync::RwLock;

use crate::error::{InventoryError, Result};
use crate::item::InventoryItem;

/// Inventory service backed by an in-memory ledger.
///
/// Cloning is cheap and every clone shares the same ledger.
#[derive(Debug, Clone, Default)]
pub struct InventoryService {
    items: Arc<RwLock<HashMap<ProductId, InventoryItem>>>,
}

impl InventoryService {
    /// Creates an empty inventory service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory service seeded with the given stock records.
    pub fn with_items(items: impl IntoIterator<Item = InventoryItem>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.product_id.clone(), item))
            .collect();
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Adds or replaces a product's stock record.
    pub async fn register(&self, item: InventoryItem) -> InventoryItem {
        tracing::info!(
            product_id = %item.product_id,
            quantity = item.quantity,
            "product registered"
        );
        self.items
            .write()
            .await
            .insert(item.product_id.clone(), item.clone());
        item
    }

    /// Returns true if at least `quantity` units of the product are available.
    ///
    /// Unknown products are reported as unavailable rather than as an error.
    #[tracing::instrument(skip(self))]
    pub async fn check_availability(&self, product_id: &ProductId, quantity: u32) -> bool {
        let items = self.items.read().await;

        let Some(item) = items.get(product_id) else {
            tracing::warn!("product not found in inventory");
            metrics::counter!("inventory_checks_total", "result" => "unknown_product").increment(1);
            return false;
        };

        let available = item.calculate_available();
        if item.is_critical() {
            tracing::warn!(available, "critical stock level");
        }

        let has_stock = available >= i64::from(quantity);
        if has_stock {
            tracing::info!(available, "sufficient stock available");
            metrics::counter!("inventory_checks_total", "result" => "available").increment(1);
        } else {
            tracing::warn!(available, required = quantity, "insufficient stock");
            metrics::counter!("inventory_checks_total", "result" => "insufficient").increment(1);
        }

        has_stock
    }

    /// Returns the stock record for a product.
    pub async fn get(&self, product_id: &ProductId) -> Result<InventoryItem> {
        self.items
            .read()
            .await
            .get(product_id)
            .cloned()
            .ok_or_else(|| InventoryError::ProductNotFound(product_id.clone()))
    }

    /// Returns every stock record, sorted by product ID.
    pub async fn list_all(&self) -> Vec<InventoryItem> {
        let mut all: Vec<_> = self.items.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        all
    }

    /// Returns the stock records whose available quantity is critical.
    pub async fn list_critical(&self) -> Vec<InventoryItem> {
        self.list_all()
            .await
            .into_iter()
            .filter(InventoryItem::is_critical)
            .collect()
    }

    /// Sets the on-hand quantity for a product.
    #[tracing::instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<InventoryItem> {
        self.modify(product_id, |_| Ok(quantity)).await
    }

    /// Removes `quantity` units from on-hand stock.
    ///
    /// Fails with `InsufficientStock`, leaving the record untouched, if the
    /// result would be negative.
    #[tracing::instrument(skip(self))]
    pub async fn decrease_stock(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<InventoryItem> {
        self.modify(product_id, |item| {
            item.quantity
                .checked_sub(quantity)
                .ok_or_else(|| InventoryError::InsufficientStock {
                    product_id: product_id.clone(),
                    on_hand: item.quantity,
                    requested: quantity,
                })
        })
        .await
    }

    /// Adds `quantity` units to on-hand stock.
    #[tracing::instrument(skip(self))]
    pub async fn increase_stock(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<InventoryItem> {
        self.modify(product_id, |item| {
            item.quantity
                .checked_add(quantity)
                .ok_or_else(|| InventoryError::QuantityOverflow(product_id.clone()))
        })
        .await
    }

    /// Computes a new on-hand quantity under the write lock and applies it.
    async fn modify<F>(&self, product_id: &ProductId, new_quantity: F) -> Result<InventoryItem>
    where
        F: FnOnce(&InventoryItem) -> Result<u32>,
    {
        let mut items = self.items.write().await;
        let item = items
            .get_mut(product_id)
            .ok_or_else(|| InventoryError::ProductNotFound(product_id.clone()))?;

        let quantity = new_quantity(item)?;
        item.set_quantity(quantity);

        if item.is_critical() {
            tracing::warn!(quantity, available = item.available_quantity, "critical stock level");
        }
        tracing::info!(quantity, "inventory updated");

        Ok(item.clone())
    }
}
