//! # AMS Telemetry
//!
//! Structured logging for the asset management ledger, built on `tracing`.
//! Logs go to stderr so stdout stays free for invocation responses.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ams_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // Spans and events from every crate are now filtered and formatted
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AMS_SERVICE_NAME` | `ams-ledger` | Service name in logs |
//! | `AMS_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `AMS_CONSOLE_OUTPUT` | `true` | Write logs at all |
//! | `AMS_JSON_LOGS` | `false` | JSON formatted lines |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed or the level filter does not
/// parse.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_setup::init_tracing(config)
}

/// Convenience macro for creating a span tagged with a component.
///
/// ```rust,ignore
/// let _span = ams_telemetry::component_span!("replay", component = "node", line = 3);
/// ```
#[macro_export]
macro_rules! component_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
