//! Order status state machine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// Pending ──► InventoryChecked ──► PaymentProcessing ──► Completed
///    │               │                  │
///    ├───────────────┼──────────────────┴──► Failed
///    │               │                          │
///    └───────────────┴──────────────────────────┴──► Cancelled
/// ```
///
/// Failure exits only leave the inventory step (`Pending`) and the payment
/// step (`PaymentProcessing`). Nothing re-enters `Pending` or
/// `InventoryChecked`, and `Completed` accepts no further transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order recorded, inventory not yet checked.
    #[default]
    Pending,

    /// Inventory reported the requested quantity as available.
    InventoryChecked,

    /// Payment call in flight.
    PaymentProcessing,

    /// Payment succeeded (terminal state).
    Completed,

    /// Inventory or payment step failed (terminal state).
    Failed,

    /// Order was cancelled by request (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the order may move from this status to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        match (self, next) {
            (Pending, InventoryChecked | Failed) => true,
            (InventoryChecked, PaymentProcessing) => true,
            (PaymentProcessing, Completed | Failed) => true,
            (_, Cancelled) => self.can_cancel(),
            _ => false,
        }
    }

    /// Returns true if the order can be cancelled in this status.
    pub fn can_cancel(&self) -> bool {
        !matches!(self, OrderStatus::Completed)
    }

    /// Returns true if this is a terminal status (no automatic transition follows).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Failed | OrderStatus::Cancelled
        )
    }

    /// Returns the status name as it appears on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InventoryChecked => "INVENTORY_CHECKED",
            OrderStatus::PaymentProcessing => "PAYMENT_PROCESSING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Failed => "FAILED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when parsing a status name that is not part of the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "INVENTORY_CHECKED" => Ok(OrderStatus::InventoryChecked),
            "PAYMENT_PROCESSING" => Ok(OrderStatus::PaymentProcessing),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "FAILED" => Ok(OrderStatus::Failed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::InventoryChecked,
        OrderStatus::PaymentProcessing,
        OrderStatus::Completed,
        OrderStatus::Failed,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_happy_path_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::InventoryChecked));
        assert!(OrderStatus::InventoryChecked.can_transition_to(OrderStatus::PaymentProcessing));
        assert!(OrderStatus::PaymentProcessing.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn test_failure_exits_only_from_inventory_and_payment_steps() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Failed));
        assert!(!OrderStatus::InventoryChecked.can_transition_to(OrderStatus::Failed));
        assert!(OrderStatus::PaymentProcessing.can_transition_to(OrderStatus::Failed));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Failed));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Failed));
    }

    #[test]
    fn test_nothing_re_enters_pending_or_inventory_checked() {
        for status in ALL {
            assert!(!status.can_transition_to(OrderStatus::Pending));
            if status != OrderStatus::Pending {
                assert!(!status.can_transition_to(OrderStatus::InventoryChecked));
            }
        }
    }

    #[test]
    fn test_cancel_allowed_everywhere_but_completed() {
        for status in ALL {
            assert_eq!(
                status.can_transition_to(OrderStatus::Cancelled),
                status != OrderStatus::Completed
            );
        }
    }

    #[test]
    fn test_completed_is_final() {
        for status in ALL {
            assert!(!OrderStatus::Completed.can_transition_to(status));
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::InventoryChecked.is_terminal());
        assert!(!OrderStatus::PaymentProcessing.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_display_and_parse_agree() {
        for status in ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("SHIPPED".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&OrderStatus::InventoryChecked).unwrap();
        assert_eq!(json, "\"INVENTORY_CHECKED\"");
    }
}
