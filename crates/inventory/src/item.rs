//! Stock record for a single product.

use chrono::{DateTime, Utc};
use domain::ProductId;
use serde::{Deserialize, Serialize};

/// Products with fewer than this many units available are reported as critical.
pub const CRITICAL_STOCK_THRESHOLD: i64 = 10;

/// Stock held for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub product_id: ProductId,
    pub product_name: String,
    /// Units on hand.
    pub quantity: u32,
    /// Units held back from sale.
    pub reserved_quantity: u32,
    /// On hand minus reserved; refreshed by [`InventoryItem::set_quantity`].
    pub available_quantity: i64,
    pub last_updated: DateTime<Utc>,
}

impl InventoryItem {
    /// Creates a stock record with nothing reserved.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            reserved_quantity: 0,
            available_quantity: i64::from(quantity),
            last_updated: Utc::now(),
        }
    }

    /// Sets the reserved quantity.
    pub fn with_reserved(mut self, reserved_quantity: u32) -> Self {
        self.reserved_quantity = reserved_quantity;
        self.available_quantity = self.calculate_available();
        self
    }

    /// Returns on-hand minus reserved.
    pub fn calculate_available(&self) -> i64 {
        i64::from(self.quantity) - i64::from(self.reserved_quantity)
    }

    /// Returns true when available stock is below [`CRITICAL_STOCK_THRESHOLD`].
    pub fn is_critical(&self) -> bool {
        self.calculate_available() < CRITICAL_STOCK_THRESHOLD
    }

    /// Replaces the on-hand quantity and recomputes availability.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.available_quantity = self.calculate_available();
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_is_on_hand_minus_reserved() {
        let item = InventoryItem::new("p1", "Widget", 20).with_reserved(5);
        assert_eq!(item.available_quantity, 15);
        assert_eq!(item.calculate_available(), 15);
    }

    #[test]
    fn test_available_can_go_negative_when_over_reserved() {
        let item = InventoryItem::new("p1", "Widget", 3).with_reserved(5);
        assert_eq!(item.available_quantity, -2);
        assert!(item.is_critical());
    }

    #[test]
    fn test_critical_threshold_boundary() {
        assert!(InventoryItem::new("p1", "Widget", 9).is_critical());
        assert!(!InventoryItem::new("p1", "Widget", 10).is_critical());
    }

    #[test]
    fn test_set_quantity_recomputes_available() {
        let mut item = InventoryItem::new("p1", "Widget", 20).with_reserved(4);
        let before = item.last_updated;

        item.set_quantity(8);
        assert_eq!(item.quantity, 8);
        assert_eq!(item.available_quantity, 4);
        assert!(item.last_updated >= before);
    }
}
