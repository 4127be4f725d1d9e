//! Service configuration.

use crate::adapters::DEFAULT_EVENT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for `ContractService`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Buffered events per subscriber before the slowest one starts lagging.
    pub event_channel_capacity: usize,

    /// Log every committed event payload at debug level.
    pub log_payloads: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: DEFAULT_EVENT_CAPACITY,
            log_payloads: false,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AMS_EVENT_CAPACITY`: event channel capacity (default: 1024)
    /// - `AMS_LOG_PAYLOADS`: log event payloads (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            event_channel_capacity: env::var("AMS_EVENT_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|capacity: &usize| *capacity > 0)
                .unwrap_or(defaults.event_channel_capacity),

            log_payloads: env::var("AMS_LOG_PAYLOADS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.log_payloads),
        }
    }
}
