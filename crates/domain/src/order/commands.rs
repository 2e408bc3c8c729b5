//! Order commands.

use common::OrderId;

use super::{CustomerId, Money, OrderError, ProductId};

/// Command to create a new order for a single product line.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// The order ID to create.
    pub order_id: OrderId,

    /// The customer placing the order.
    pub customer_id: CustomerId,

    /// The product being ordered.
    pub product_id: ProductId,

    /// Requested quantity (must be greater than 0).
    pub quantity: u32,

    /// Total charged for the order (must not be negative).
    pub total_amount: Money,
}

impl CreateOrder {
    /// Creates a new CreateOrder command with a generated order ID.
    pub fn new(
        customer_id: impl Into<CustomerId>,
        product_id: impl Into<ProductId>,
        quantity: u32,
        total_amount: Money,
    ) -> Self {
        Self {
            order_id: OrderId::new(),
            customer_id: customer_id.into(),
            product_id: product_id.into(),
            quantity,
            total_amount,
        }
    }

    /// Checks the command's inputs.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.customer_id.is_blank() {
            return Err(OrderError::CustomerIdRequired);
        }

        if self.product_id.is_blank() {
            return Err(OrderError::ProductIdRequired);
        }

        if self.quantity == 0 {
            return Err(OrderError::InvalidQuantity {
                quantity: self.quantity,
            });
        }

        if self.total_amount.is_negative() {
            return Err(OrderError::InvalidAmount {
                amount: self.total_amount,
            });
        }

        Ok(())
    }
}
