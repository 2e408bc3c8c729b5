use std::time::Duration;

/// Per-step timeouts for downstream calls.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub inventory_timeout: Duration,
    pub payment_timeout: Duration,
}

impl OrchestratorConfig {
    /// Sets the inventory check timeout.
    pub fn with_inventory_timeout(mut self, timeout: Duration) -> Self {
        self.inventory_timeout = timeout;
        self
    }

    /// Sets the payment call timeout.
    pub fn with_payment_timeout(mut self, timeout: Duration) -> Self {
        self.payment_timeout = timeout;
        self
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            inventory_timeout: Duration::from_secs(5),
            payment_timeout: Duration::from_secs(10),
        }
    }
}
