//! Pipeline configuration loaded from environment variables.

use std::time::Duration;

/// Simulated latency and failure configuration with sensible defaults.
///
/// The default delays match the original mock timings. Reads from
/// environment variables:
/// - `LOOKUP_DELAY_MS` — catalog lookup latency (default: `350`)
/// - `STOCK_DELAY_MS` — stock verification latency (default: `250`)
/// - `CHARGE_DELAY_MS` — payment charge latency (default: `500`)
/// - `CANCEL_DELAY_MS` — payment cancellation latency (default: `200`)
/// - `INVOICE_DELAY_MS` — invoice generation latency (default: `300`)
/// - `NOTIFY_DELAY_MS` — confirmation delivery latency (default: `300`)
/// - `SIMULATE_PAYMENT_FAILURE` — decline every charge (default: `false`)
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub lookup_delay: Duration,
    pub stock_delay: Duration,
    pub charge_delay: Duration,
    pub cancel_delay: Duration,
    pub invoice_delay: Duration,
    pub notify_delay: Duration,
    pub simulate_payment_failure: bool,
}

impl PipelineConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lookup_delay: env_millis("LOOKUP_DELAY_MS", defaults.lookup_delay),
            stock_delay: env_millis("STOCK_DELAY_MS", defaults.stock_delay),
            charge_delay: env_millis("CHARGE_DELAY_MS", defaults.charge_delay),
            cancel_delay: env_millis("CANCEL_DELAY_MS", defaults.cancel_delay),
            invoice_delay: env_millis("INVOICE_DELAY_MS", defaults.invoice_delay),
            notify_delay: env_millis("NOTIFY_DELAY_MS", defaults.notify_delay),
            simulate_payment_failure: env_flag("SIMULATE_PAYMENT_FAILURE"),
        }
    }

    /// Returns a configuration with all delays set to zero, for tests that
    /// don't exercise timing.
    pub fn instant() -> Self {
        Self {
            lookup_delay: Duration::ZERO,
            stock_delay: Duration::ZERO,
            charge_delay: Duration::ZERO,
            cancel_delay: Duration::ZERO,
            invoice_delay: Duration::ZERO,
            notify_delay: Duration::ZERO,
            simulate_payment_failure: false,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lookup_delay: Duration::from_millis(350),
            stock_delay: Duration::from_millis(250),
            charge_delay: Duration::from_millis(500),
            cancel_delay: Duration::from_millis(200),
            invoice_delay: Duration::from_millis(300),
            notify_delay: Duration::from_millis(300),
            simulate_payment_failure: false,
        }
    }
}

fn env_millis(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
