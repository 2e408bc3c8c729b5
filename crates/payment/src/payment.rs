//! Payment records and value types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{CustomerId, Money};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Method recorded when the request does not name one.
pub const DEFAULT_PAYMENT_METHOD: &str = "CREDIT_CARD";

/// Unique identifier for a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random payment ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Lifecycle of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    /// Returns the status name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Processing => "PROCESSING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a simulated payment was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    InsufficientFunds,
    CardDeclined,
    ExpiredCard,
    FraudDetected,
    NetworkError,
    Timeout,
}

impl FailureReason {
    /// Every reason the simulator can report.
    pub const ALL: [FailureReason; 6] = [
        FailureReason::InsufficientFunds,
        FailureReason::CardDeclined,
        FailureReason::ExpiredCard,
        FailureReason::FraudDetected,
        FailureReason::NetworkError,
        FailureReason::Timeout,
    ];

    /// Returns the reason name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::InsufficientFunds => "INSUFFICIENT_FUNDS",
            FailureReason::CardDeclined => "CARD_DECLINED",
            FailureReason::ExpiredCard => "EXPIRED_CARD",
            FailureReason::FraudDetected => "FRAUD_DETECTED",
            FailureReason::NetworkError => "NETWORK_ERROR",
            FailureReason::Timeout => "TIMEOUT",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to charge a customer for an order.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub amount: Money,
    pub payment_method: Option<String>,
}

impl PaymentRequest {
    /// Creates a request using the default payment method.
    pub fn new(order_id: OrderId, customer_id: impl Into<CustomerId>, amount: Money) -> Self {
        Self {
            order_id,
            customer_id: customer_id.into(),
            amount,
            payment_method: None,
        }
    }

    /// Sets the payment method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }
}

/// A recorded payment attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub amount: Money,
    pub status: PaymentStatus,
    pub payment_method: String,
    pub failure_reason: Option<FailureReason>,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Starts a new attempt in `Processing` status.
    pub fn processing(request: PaymentRequest) -> Self {
        Self {
            payment_id: PaymentId::new(),
            order_id: request.order_id,
            customer_id: request.customer_id,
            amount: request.amount,
            status: PaymentStatus::Processing,
            payment_method: request
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            failure_reason: None,
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    /// Returns true if the charge went through.
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_defaults_payment_method() {
        let payment = Payment::processing(PaymentRequest::new(
            OrderId::new(),
            "c1",
            Money::from_cents(100),
        ));
        assert_eq!(payment.status, PaymentStatus::Processing);
        assert_eq!(payment.payment_method, DEFAULT_PAYMENT_METHOD);
        assert!(payment.processed_at.is_none());
    }

    #[test]
    fn test_processing_keeps_explicit_method() {
        let request =
            PaymentRequest::new(OrderId::new(), "c1", Money::from_cents(100)).with_method("PAYPAL");
        assert_eq!(Payment::processing(request).payment_method, "PAYPAL");
    }

    #[test]
    fn test_failure_reason_wire_names() {
        let names: Vec<_> = FailureReason::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(
            names,
            [
                "INSUFFICIENT_FUNDS",
                "CARD_DECLINED",
                "EXPIRED_CARD",
                "FRAUD_DETECTED",
                "NETWORK_ERROR",
                "TIMEOUT"
            ]
        );
        let json = serde_json::to_string(&FailureReason::FraudDetected).unwrap();
        assert_eq!(json, "\"FRAUD_DETECTED\"");
    }

    #[test]
    fn test_payment_id_parses() {
        let id = PaymentId::new();
        assert_eq!(id.to_string().parse::<PaymentId>().unwrap(), id);
        assert!("xyz".parse::<PaymentId>().is_err());
    }
}
