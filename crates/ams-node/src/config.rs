//! # Node Configuration
//!
//! Combines the contract service and telemetry settings with the node's own
//! startup options.

use ams_contract::ServiceConfig;
use ams_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Contract service configuration.
    pub service: ServiceConfig,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
    /// File of JSON invocations replayed before serving stdin.
    pub seed_file: Option<PathBuf>,
}

impl NodeConfig {
    /// Load configuration from environment.
    ///
    /// `AMS_SEED_FILE` names the seed file; the other variables are read by
    /// `ServiceConfig::from_env` and `TelemetryConfig::from_env`.
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig::from_env(),
            telemetry: TelemetryConfig::for_component("node"),
            seed_file: std::env::var_os("AMS_SEED_FILE")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }
}
