//! Order record and its lifecycle transitions.

use chrono::{DateTime, Utc};
use common::{OrderId, Version};
use serde::{Deserialize, Serialize};

use super::{CreateOrder, CustomerId, Money, OrderError, OrderStatus, ProductId};

/// A customer's request to purchase a quantity of one product.
///
/// Status changes only go through the transition methods below, which
/// enforce the graph in [`OrderStatus::can_transition_to`] and bump
/// `updated_at`. The version tracks what the store has persisted and is
/// advanced by [`Order::mark_persisted`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    version: Version,
    customer_id: CustomerId,
    product_id: ProductId,
    quantity: u32,
    total_amount: Money,
    status: OrderStatus,
    failure_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Validates the command and creates a new order in `Pending` status.
    pub fn create(cmd: CreateOrder) -> Result<Self, OrderError> {
        cmd.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: cmd.order_id,
            version: Version::initial(),
            customer_id: cmd.customer_id,
            product_id: cmd.product_id,
            quantity: cmd.quantity,
            total_amount: cmd.total_amount,
            status: OrderStatus::Pending,
            failure_reason: None,
            created_at: now,
            updated_at: now,
        })
    }
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the last persisted version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the customer ID.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the product ID.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the requested quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the total amount.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns why the order failed, if it did.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-updated timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a human-readable summary of the order's status.
    pub fn message(&self) -> String {
        match self.status {
            OrderStatus::Pending => "Order received".to_string(),
            OrderStatus::InventoryChecked => "Inventory confirmed".to_string(),
            OrderStatus::PaymentProcessing => "Payment in progress".to_string(),
            OrderStatus::Completed => "Order completed successfully".to_string(),
            OrderStatus::Failed => match &self.failure_reason {
                Some(reason) => format!("Order failed: {reason}"),
                None => "Order failed".to_string(),
            },
            OrderStatus::Cancelled => "Order cancelled".to_string(),
        }
    }
}

// Transition methods
impl Order {
    /// Records that inventory reported the requested quantity as available.
    pub fn mark_inventory_checked(&mut self) -> Result<(), OrderError> {
        self.transition(OrderStatus::InventoryChecked, "mark inventory checked")
    }

    /// Moves the order into the payment step.
    pub fn begin_payment(&mut self) -> Result<(), OrderError> {
        self.transition(OrderStatus::PaymentProcessing, "begin payment")
    }

    /// Completes the order after a successful payment.
    pub fn complete(&mut self) -> Result<(), OrderError> {
        self.transition(OrderStatus::Completed, "complete")
    }

    /// Fails the order from the inventory or payment step.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), OrderError> {
        self.transition(OrderStatus::Failed, "fail")?;
        self.failure_reason = Some(reason.into());
        Ok(())
    }

    /// Cancels the order. Completed orders cannot be cancelled.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        if !self.status.can_cancel() {
            return Err(OrderError::CannotCancelCompleted);
        }
        self.transition(OrderStatus::Cancelled, "cancel")
    }

    /// Records the version the store assigned on the last successful write.
    pub fn mark_persisted(&mut self, version: Version) {
        self.version = version;
    }

    fn transition(&mut self, next: OrderStatus, action: &'static str) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action,
            });
        }

        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Flat, field-public view of an [`Order`] used by storage backends to
/// read and write rows without going through the transition methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub version: Version,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.id,
            version: record.version,
            customer_id: record.customer_id,
            product_id: record.product_id,
            quantity: record.quantity,
            total_amount: record.total_amount,
            status: record.status,
            failure_reason: record.failure_reason,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            version: order.version,
            customer_id: order.customer_id.clone(),
            product_id: order.product_id.clone(),
            quantity: order.quantity,
            total_amount: order.total_amount,
            status: order.status,
            failure_reason: order.failure_reason.clone(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_order() -> Order {
        Order::create(CreateOrder::new("c1", "p1", 5, Money::from_cents(10000))).unwrap()
    }

    #[test]
    fn test_create_order_starts_pending() {
        let order = create_order();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.version(), Version::initial());
        assert_eq!(order.customer_id().as_str(), "c1");
        assert_eq!(order.product_id().as_str(), "p1");
        assert_eq!(order.quantity(), 5);
        assert_eq!(order.total_amount().cents(), 10000);
        assert_eq!(order.created_at(), order.updated_at());
        assert!(order.failure_reason().is_none());
    }

    #[test]
    fn test_create_order_rejects_invalid_input() {
        let result = Order::create(CreateOrder::new("c1", "p1", 0, Money::zero()));
        assert!(matches!(result, Err(OrderError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_full_lifecycle_to_completed() {
        let mut order = create_order();
        let created_at = order.created_at();

        order.mark_inventory_checked().unwrap();
        assert_eq!(order.status(), OrderStatus::InventoryChecked);

        order.begin_payment().unwrap();
        assert_eq!(order.status(), OrderStatus::PaymentProcessing);

        order.complete().unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(order.created_at(), created_at);
        assert!(order.updated_at() >= created_at);
        assert_eq!(order.message(), "Order completed successfully");
    }

    #[test]
    fn test_fail_from_pending_records_reason() {
        let mut order = create_order();
        order.fail("Insufficient inventory").unwrap();

        assert_eq!(order.status(), OrderStatus::Failed);
        assert_eq!(order.failure_reason(), Some("Insufficient inventory"));
        assert_eq!(order.message(), "Order failed: Insufficient inventory");
    }

    #[test]
    fn test_fail_from_payment_step() {
        let mut order = create_order();
        order.mark_inventory_checked().unwrap();
        order.begin_payment().unwrap();

        order.fail("Payment declined").unwrap();
        assert_eq!(order.status(), OrderStatus::Failed);
    }

    #[test]
    fn test_cannot_skip_inventory_check() {
        let mut order = create_order();
        let result = order.begin_payment();

        assert!(matches!(
            result,
            Err(OrderError::InvalidStateTransition {
                current_state: OrderStatus::Pending,
                ..
            })
        ));
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn test_failed_order_keeps_reason_when_rejected_again() {
        let mut order = create_order();
        order.fail("first").unwrap();

        assert!(order.fail("second").is_err());
        assert_eq!(order.failure_reason(), Some("first"));
    }

    #[test]
    fn test_cancel_pending_and_failed_orders() {
        let mut order = create_order();
        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);

        let mut order = create_order();
        order.fail("Payment declined").unwrap();
        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_completed_order_fails() {
        let mut order = create_order();
        order.mark_inventory_checked().unwrap();
        order.begin_payment().unwrap();
        order.complete().unwrap();

        let result = order.cancel();
        assert!(matches!(result, Err(OrderError::CannotCancelCompleted)));
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[test]
    fn test_record_conversion_preserves_fields() {
        let mut order = create_order();
        order.fail("Payment declined").unwrap();
        order.mark_persisted(Version::new(3));

        let record = OrderRecord::from(&order);
        assert_eq!(record.version, Version::new(3));
        assert_eq!(record.status, OrderStatus::Failed);

        let restored = Order::from(record);
        assert_eq!(restored, order);
    }
}
