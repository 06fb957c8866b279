//! Telemetry module
//!
//! Metrics and logging; the detection core stays silent and all emission
//! happens at the CLI and provider layers.

mod logging;
mod metrics;

pub use logging::init_logging;
pub use metrics::{count_skip, increment, record_scan, CounterMetric};

use crate::config::TelemetryConfig;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Guard that cleans up telemetry on drop
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level)?;

    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], config.metrics_port))
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    Ok(TelemetryGuard { _priv: () })
}
