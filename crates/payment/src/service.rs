//! Simulated payment processor.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::OrderId;
use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::{PaymentError, Result};
use crate::failure_rate::FailureRate;
use crate::payment::{FailureReason, Payment, PaymentId, PaymentRequest, PaymentStatus};

/// Tunables for the simulated processor.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Nominal processing delay; each attempt waits 80% to 120% of it.
    pub processing_time: Duration,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            processing_time: Duration::from_millis(500),
        }
    }
}

/// Aggregate counts over all recorded attempts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatistics {
    pub total_payments: usize,
    pub successful_payments: usize,
    pub failed_payments: usize,
    pub actual_failure_rate: f64,
    pub configured_failure_rate: f64,
}

/// Payment service with an in-memory ledger of attempts.
///
/// Cloning is cheap; clones share the ledger and the failure-rate cell.
#[derive(Debug, Clone)]
pub struct PaymentService {
    payments: Arc<RwLock<HashMap<PaymentId, Payment>>>,
    failure_rate: FailureRate,
    config: PaymentConfig,
}

impl PaymentService {
    /// Creates a payment service reading its failure probability from `failure_rate`.
    pub fn new(config: PaymentConfig, failure_rate: FailureRate) -> Self {
        Self {
            payments: Arc::default(),
            failure_rate,
            config,
        }
    }

    /// Charges the customer and reports whether the charge went through.
    pub async fn process_payment(&self, request: PaymentRequest) -> bool {
        self.charge(request).await.is_completed()
    }

    /// Runs one simulated payment attempt and returns the recorded outcome.
    ///
    /// The attempt is stored in `Processing` before the delay, so a caller
    /// that gives up early leaves it visible in that status.
    #[tracing::instrument(
        skip(self, request),
        fields(order_id = %request.order_id, amount = %request.amount)
    )]
    pub async fn charge(&self, request: PaymentRequest) -> Payment {
        tracing::info!("processing payment");

        let mut payment = Payment::processing(request);
        self.payments
            .write()
            .await
            .insert(payment.payment_id, payment.clone());

        let delay = self.processing_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let should_fail = rand::random::<f64>() < self.failure_rate.get();
        if should_fail {
            let reason = random_failure_reason();
            payment.status = PaymentStatus::Failed;
            payment.failure_reason = Some(reason);
            tracing::error!(%reason, "payment failed");
        } else {
            payment.status = PaymentStatus::Completed;
            tracing::info!(payment_id = %payment.payment_id, "payment successful");
        }
        payment.processed_at = Some(Utc::now());

        self.payments
            .write()
            .await
            .insert(payment.payment_id, payment.clone());

        metrics::counter!("payments_processed_total", "status" => payment.status.as_str())
            .increment(1);
        payment
    }

    /// Returns a payment by ID.
    pub async fn get_payment(&self, payment_id: PaymentId) -> Result<Payment> {
        self.payments
            .read()
            .await
            .get(&payment_id)
            .cloned()
            .ok_or(PaymentError::PaymentNotFound(payment_id))
    }

    /// Returns the most recent payment attempt for an order.
    pub async fn get_payment_by_order(&self, order_id: OrderId) -> Result<Payment> {
        self.payments
            .read()
            .await
            .values()
            .filter(|p| p.order_id == order_id)
            .max_by_key(|p| p.created_at)
            .cloned()
            .ok_or(PaymentError::OrderPaymentNotFound(order_id))
    }

    /// Refunds a completed payment.
    #[tracing::instrument(skip(self))]
    pub async fn refund(&self, payment_id: PaymentId) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        let payment = payments
            .get_mut(&payment_id)
            .ok_or(PaymentError::PaymentNotFound(payment_id))?;

        if payment.status != PaymentStatus::Completed {
            return Err(PaymentError::NotRefundable {
                payment_id,
                status: payment.status,
            });
        }

        payment.status = PaymentStatus::Refunded;
        tracing::info!("payment refunded");
        Ok(payment.clone())
    }

    /// Returns the current failure probability.
    pub fn failure_rate(&self) -> f64 {
        self.failure_rate.get()
    }

    /// Changes the failure probability for subsequent attempts.
    pub fn set_failure_rate(&self, rate: f64) -> Result<()> {
        self.failure_rate.set(rate)?;
        tracing::info!(rate_percent = rate * 100.0, "payment failure rate changed");
        Ok(())
    }

    /// Summarises every recorded attempt.
    pub async fn statistics(&self) -> PaymentStatistics {
        let payments = self.payments.read().await;
        let total_payments = payments.len();
        let successful_payments = payments
            .values()
            .filter(|p| p.status == PaymentStatus::Completed)
            .count();
        let failed_payments = payments
            .values()
            .filter(|p| p.status == PaymentStatus::Failed)
            .count();

        let actual_failure_rate = if total_payments > 0 {
            failed_payments as f64 / total_payments as f64
        } else {
            0.0
        };

        PaymentStatistics {
            total_payments,
            successful_payments,
            failed_payments,
            actual_failure_rate,
            configured_failure_rate: self.failure_rate.get(),
        }
    }

    fn processing_delay(&self) -> Duration {
        let jitter = 0.8 + rand::random::<f64>() * 0.4;
        self.config.processing_time.mul_f64(jitter)
    }
}

fn random_failure_reason() -> FailureReason {
    let index = rand::thread_rng().gen_range(0..FailureReason::ALL.len());
    FailureReason::ALL[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Money;

    fn service_with_rate(rate: f64) -> PaymentService {
        PaymentService::new(
            PaymentConfig {
                processing_time: Duration::ZERO,
            },
            FailureRate::new(rate).unwrap(),
        )
    }

    fn request() -> PaymentRequest {
        PaymentRequest::new(OrderId::new(), "c1", Money::from_cents(10000))
    }

    #[tokio::test]
    async fn test_zero_failure_rate_always_succeeds() {
        let service = service_with_rate(0.0);
        for _ in 0..50 {
            assert!(service.process_payment(request()).await);
        }

        let stats = service.statistics().await;
        assert_eq!(stats.total_payments, 50);
        assert_eq!(stats.successful_payments, 50);
        assert_eq!(stats.actual_failure_rate, 0.0);
    }

    #[tokio::test]
    async fn test_full_failure_rate_always_fails_with_known_reason() {
        let service = service_with_rate(1.0);
        for _ in 0..50 {
            let payment = service.charge(request()).await;
            assert_eq!(payment.status, PaymentStatus::Failed);
            let reason = payment.failure_reason.unwrap();
            assert!(FailureReason::ALL.contains(&reason));
            assert!(payment.processed_at.is_some());
        }

        let stats = service.statistics().await;
        assert_eq!(stats.failed_payments, 50);
        assert_eq!(stats.actual_failure_rate, 1.0);
        assert_eq!(stats.configured_failure_rate, 1.0);
    }

    #[tokio::test]
    async fn test_failure_rate_change_applies_to_next_attempt() {
        let service = service_with_rate(1.0);
        assert!(!service.process_payment(request()).await);

        service.set_failure_rate(0.0).unwrap();
        assert!(service.process_payment(request()).await);
    }

    #[tokio::test]
    async fn test_invalid_failure_rate_rejected() {
        let service = service_with_rate(0.2);
        let result = service.set_failure_rate(1.01);

        assert!(matches!(result, Err(PaymentError::InvalidFailureRate(_))));
        assert_eq!(service.failure_rate(), 0.2);
    }

    #[tokio::test]
    async fn test_get_payment_and_by_order() {
        let service = service_with_rate(0.0);
        let req = request();
        let order_id = req.order_id;

        let payment = service.charge(req).await;
        let by_id = service.get_payment(payment.payment_id).await.unwrap();
        let by_order = service.get_payment_by_order(order_id).await.unwrap();

        assert_eq!(by_id, payment);
        assert_eq!(by_order.payment_id, payment.payment_id);
    }

    #[tokio::test]
    async fn test_lookups_for_unknown_ids_fail() {
        let service = service_with_rate(0.0);

        assert!(matches!(
            service.get_payment(PaymentId::new()).await,
            Err(PaymentError::PaymentNotFound(_))
        ));
        assert!(matches!(
            service.get_payment_by_order(OrderId::new()).await,
            Err(PaymentError::OrderPaymentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_refund_completed_payment() {
        let service = service_with_rate(0.0);
        let payment = service.charge(request()).await;

        let refunded = service.refund(payment.payment_id).await.unwrap();
        assert_eq!(refunded.status, PaymentStatus::Refunded);

        // A refunded payment is no longer refundable
        let again = service.refund(payment.payment_id).await;
        assert!(matches!(
            again,
            Err(PaymentError::NotRefundable {
                status: PaymentStatus::Refunded,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_refund_failed_payment_rejected() {
        let service = service_with_rate(1.0);
        let payment = service.charge(request()).await;

        let result = service.refund(payment.payment_id).await;
        assert!(matches!(
            result,
            Err(PaymentError::NotRefundable {
                status: PaymentStatus::Failed,
                ..
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_processing_delay_within_jitter_bounds() {
        let service = PaymentService::new(
            PaymentConfig {
                processing_time: Duration::from_millis(100),
            },
            FailureRate::never(),
        );

        let started = tokio::time::Instant::now();
        service.charge(request()).await;
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(80));
        assert!(elapsed <= Duration::from_millis(121));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_attempt_stays_processing() {
        let service = PaymentService::new(
            PaymentConfig {
                processing_time: Duration::from_secs(5),
            },
            FailureRate::never(),
        );
        let req = request();
        let order_id = req.order_id;

        let result = tokio::time::timeout(Duration::from_secs(1), service.charge(req)).await;
        assert!(result.is_err());

        let payment = service.get_payment_by_order(order_id).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Processing);
    }
}
