//! The order lifecycle driver.

use std::future::Future;
use std::time::{Duration, Instant};

use common::OrderId;
use domain::{CreateOrder, Order, OrderStatus};
use order_store::{OrderStore, OrderStoreExt, StoreError};
use payment::PaymentRequest;

use crate::collaborators::{CollaboratorError, InventoryClient, PaymentClient};
use crate::config::OrchestratorConfig;
use crate::error::{OrchestratorError, Result};
use crate::outcome::StepOutcome;
use crate::steps;

/// Attempts a cancel makes before giving up on a racing writer.
const MAX_CANCEL_ATTEMPTS: usize = 3;

/// Result of writing an order the orchestrator is processing.
enum Persisted {
    Written,
    /// The order was cancelled underneath us; carries the stored view.
    Cancelled(Order),
}

/// Drives orders from `PENDING` to a terminal status.
///
/// Creation runs the inventory check and then the payment call, one after
/// the other, persisting every transition. Either step answering no, failing
/// or timing out moves the order to `FAILED` and stops processing.
pub struct OrderOrchestrator<S, I, P>
where
    S: OrderStore,
    I: InventoryClient,
    P: PaymentClient,
{
    store: S,
    inventory: I,
    payment: P,
    config: OrchestratorConfig,
}

impl<S, I, P> OrderOrchestrator<S, I, P>
where
    S: OrderStore,
    I: InventoryClient,
    P: PaymentClient,
{
    /// Creates a new orchestrator.
    pub fn new(store: S, inventory: I, payment: P, config: OrchestratorConfig) -> Self {
        Self {
            store,
            inventory,
            payment,
            config,
        }
    }

    /// Creates an order and processes it to completion.
    ///
    /// Returns the final persisted order, which is `COMPLETED` or `FAILED`
    /// (or `CANCELLED` if a cancel landed while it was in flight). Only
    /// invalid input and store faults are returned as errors.
    #[tracing::instrument(
        skip(self, cmd),
        fields(order_id = %cmd.order_id, product_id = %cmd.product_id)
    )]
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<Order> {
        let started = Instant::now();

        let mut order = Order::create(cmd)?;
        self.store.save(&mut order).await?;
        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(status = %order.status(), "order created");

        let order = self.process(order).await?;

        metrics::histogram!("order_processing_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        tracing::info!(status = %order.status(), "order processing finished");
        Ok(order)
    }

    /// Returns an order by ID.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order> {
        self.store
            .get(order_id)
            .await?
            .ok_or(OrchestratorError::OrderNotFound(order_id))
    }

    /// Returns every order, oldest first.
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        Ok(self.store.list().await?)
    }

    /// Cancels an order unless it has completed.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<Order> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut order = self.get_order(order_id).await?;
            order.cancel()?;

            match self.store.save(&mut order).await {
                Ok(_) => {
                    metrics::counter!("orders_cancelled_total").increment(1);
                    tracing::info!("order cancelled");
                    return Ok(order);
                }
                Err(StoreError::ConcurrencyConflict { .. }) if attempt < MAX_CANCEL_ATTEMPTS => {
                    tracing::debug!(attempt, "order changed during cancel, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn process(&self, mut order: Order) -> Result<Order> {
        // Step 1: inventory
        let outcome = self
            .call_step(
                steps::STEP_CHECK_INVENTORY,
                self.config.inventory_timeout,
                self.inventory
                    .check_availability(order.product_id(), order.quantity()),
            )
            .await;

        match outcome {
            StepOutcome::Approved => {
                order.mark_inventory_checked()?;
                if let Persisted::Cancelled(current) = self.persist(&mut order).await? {
                    return Ok(current);
                }
            }
            StepOutcome::Rejected => {
                return self
                    .fail(order, steps::STEP_CHECK_INVENTORY, "Insufficient inventory")
                    .await;
            }
            StepOutcome::Unavailable(reason) => {
                let reason = format!("Inventory service unavailable: {reason}");
                return self.fail(order, steps::STEP_CHECK_INVENTORY, reason).await;
            }
        }

        // Step 2: payment
        order.begin_payment()?;
        if let Persisted::Cancelled(current) = self.persist(&mut order).await? {
            return Ok(current);
        }

        let request = PaymentRequest::new(
            order.id(),
            order.customer_id().clone(),
            order.total_amount(),
        );
        let outcome = self
            .call_step(
                steps::STEP_PROCESS_PAYMENT,
                self.config.payment_timeout,
                self.payment.process_payment(request),
            )
            .await;

        match outcome {
            StepOutcome::Approved => {
                order.complete()?;
                if let Persisted::Cancelled(current) = self.persist(&mut order).await? {
                    return Ok(current);
                }
                metrics::counter!("orders_completed_total").increment(1);
                Ok(order)
            }
            StepOutcome::Rejected => {
                self.fail(order, steps::STEP_PROCESS_PAYMENT, "Payment declined")
                    .await
            }
            StepOutcome::Unavailable(reason) => {
                let reason = format!("Payment service unavailable: {reason}");
                self.fail(order, steps::STEP_PROCESS_PAYMENT, reason).await
            }
        }
    }

    /// Runs one downstream call under its timeout and reduces it to an outcome.
    async fn call_step<F>(&self, step: &'static str, timeout: Duration, call: F) -> StepOutcome
    where
        F: Future<Output = std::result::Result<bool, CollaboratorError>>,
    {
        tracing::info!(step, "order step started");
        let started = Instant::now();

        let result = tokio::time::timeout(timeout, call).await.ok();
        let outcome = StepOutcome::from_call(result, timeout);

        metrics::histogram!("downstream_call_duration_seconds", "step" => step)
            .record(started.elapsed().as_secs_f64());
        match &outcome {
            StepOutcome::Unavailable(reason) => {
                tracing::warn!(step, %reason, "downstream call failed");
            }
            other => tracing::info!(step, outcome = other.as_str(), "order step finished"),
        }
        outcome
    }

    async fn fail(
        &self,
        mut order: Order,
        step: &'static str,
        reason: impl Into<String>,
    ) -> Result<Order> {
        order.fail(reason)?;
        if let Persisted::Cancelled(current) = self.persist(&mut order).await? {
            return Ok(current);
        }

        metrics::counter!("orders_failed_total", "step" => step).increment(1);
        tracing::warn!(
            step,
            reason = order.failure_reason().unwrap_or_default(),
            "order failed"
        );
        Ok(order)
    }

    /// Writes a processing transition. A conflicting cancel wins.
    async fn persist(&self, order: &mut Order) -> Result<Persisted> {
        match self.store.save(order).await {
            Ok(_) => Ok(Persisted::Written),
            Err(StoreError::ConcurrencyConflict { .. }) => {
                let current = self.get_order(order.id()).await?;
                if current.status() == OrderStatus::Cancelled {
                    tracing::info!(order_id = %order.id(), "order cancelled during processing");
                    Ok(Persisted::Cancelled(current))
                } else {
                    Err(OrchestratorError::Internal(format!(
                        "order {} was modified concurrently (now {})",
                        order.id(),
                        current.status()
                    )))
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
