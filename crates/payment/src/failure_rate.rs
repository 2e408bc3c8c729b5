//! Shared, runtime-adjustable failure probability.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{PaymentError, Result};

/// Probability in `[0, 1]` that a payment attempt fails.
///
/// Stored as the bit pattern of an `f64` in an atomic, so readers see either
/// the old or the new value during an update, never a mix. Clones share the
/// same cell.
#[derive(Debug, Clone)]
pub struct FailureRate(Arc<AtomicU64>);

impl FailureRate {
    /// Creates a cell holding `rate`.
    pub fn new(rate: f64) -> Result<Self> {
        validate(rate)?;
        Ok(Self(Arc::new(AtomicU64::new(rate.to_bits()))))
    }

    /// A cell that never injects failures.
    pub fn never() -> Self {
        Self(Arc::new(AtomicU64::new(0.0_f64.to_bits())))
    }

    /// Returns the current rate.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Replaces the current rate. Values outside `[0, 1]` are rejected and
    /// leave the cell unchanged.
    pub fn set(&self, rate: f64) -> Result<()> {
        validate(rate)?;
        self.0.store(rate.to_bits(), Ordering::Release);
        Ok(())
    }
}

impl Default for FailureRate {
    fn default() -> Self {
        Self::never()
    }
}

fn validate(rate: f64) -> Result<()> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(PaymentError::InvalidFailureRate(rate))
    }
}
