//! Application configuration loaded from environment variables.

use std::time::Duration;

use orchestrator::OrchestratorConfig;
use payment::PaymentConfig;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: Postgres connection string; orders are kept in memory when unset
/// - `INVENTORY_SERVICE_URL` / `PAYMENT_SERVICE_URL`: remote collaborators;
///   the in-process services are used when unset
/// - `INVENTORY_TIMEOUT_MS` (default: `5000`), `PAYMENT_TIMEOUT_MS` (default: `10000`)
/// - `PAYMENT_FAILURE_RATE` (default: `0.1`)
/// - `PAYMENT_PROCESSING_TIME_MS` (default: `500`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub inventory_service_url: Option<String>,
    pub payment_service_url: Option<String>,
    pub inventory_timeout: Duration,
    pub payment_timeout: Duration,
    pub payment_failure_rate: f64,
    pub payment_processing_time: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            database_url: non_empty("DATABASE_URL"),
            inventory_service_url: non_empty("INVENTORY_SERVICE_URL"),
            payment_service_url: non_empty("PAYMENT_SERVICE_URL"),
            inventory_timeout: millis("INVENTORY_TIMEOUT_MS", defaults.inventory_timeout),
            payment_timeout: millis("PAYMENT_TIMEOUT_MS", defaults.payment_timeout),
            payment_failure_rate: lookup("PAYMENT_FAILURE_RATE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.payment_failure_rate),
            payment_processing_time: millis(
                "PAYMENT_PROCESSING_TIME_MS",
                defaults.payment_processing_time,
            ),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeouts for the orchestrator's downstream calls.
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig::default()
            .with_inventory_timeout(self.inventory_timeout)
            .with_payment_timeout(self.payment_timeout)
    }

    /// Settings for the in-process payment simulator.
    pub fn payment_config(&self) -> PaymentConfig {
        PaymentConfig {
            processing_time: self.payment_processing_time,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let orchestrator = OrchestratorConfig::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: None,
            inventory_service_url: None,
            payment_service_url: None,
            inventory_timeout: orchestrator.inventory_timeout,
            payment_timeout: orchestrator.payment_timeout,
            payment_failure_rate: 0.1,
            payment_processing_time: PaymentConfig::default().processing_time,
        }
    }
}
