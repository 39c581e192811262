//! Publisher configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::GraphiteError;

/// Publisher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphiteConfig {
    /// Collector address, "host:port"
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Minimum time between the end of one pass and the start of the next
    #[serde(rename = "interval-ms", default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Deadline for each individual metric write
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Capacity of the registration queue
    #[serde(rename = "registration-buffer", default = "default_registration_buffer")]
    pub registration_buffer: usize,
}

fn default_endpoint() -> String {
    debug!("default_endpoint: called");
    "localhost:2003".to_string()
}

fn default_interval_ms() -> u64 {
    debug!("default_interval_ms: called");
    10_000
}

fn default_timeout_ms() -> u64 {
    debug!("default_timeout_ms: called");
    1_000
}

fn default_registration_buffer() -> usize {
    debug!("default_registration_buffer: called");
    1000
}

fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Default for GraphiteConfig {
    fn default() -> Self {
        debug!("GraphiteConfig::default: called");
        Self {
            endpoint: default_endpoint(),
            interval_ms: default_interval_ms(),
            timeout_ms: default_timeout_ms(),
            registration_buffer: default_registration_buffer(),
        }
    }
}

impl GraphiteConfig {
    /// Config for an endpoint with the given interval and write timeout
    ///
    /// Both durations are kept at millisecond resolution. Anything under a
    /// millisecond becomes zero and is rejected by [`validate`](Self::validate).
    pub fn new(endpoint: impl Into<String>, interval: Duration, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            interval_ms: whole_millis(interval),
            timeout_ms: whole_millis(timeout),
            registration_buffer: default_registration_buffer(),
        }
    }

    /// Publish interval as a Duration
    pub fn interval(&self) -> Duration {
        debug!(interval_ms = %self.interval_ms, "GraphiteConfig::interval: called");
        Duration::from_millis(self.interval_ms)
    }

    /// Per-write timeout as a Duration
    pub fn timeout(&self) -> Duration {
        debug!(timeout_ms = %self.timeout_ms, "GraphiteConfig::timeout: called");
        Duration::from_millis(self.timeout_ms)
    }

    /// Reject settings the publisher cannot run with
    pub fn validate(&self) -> Result<(), GraphiteError> {
        if self.endpoint.trim().is_empty() {
            return Err(GraphiteError::InvalidConfig("endpoint must not be empty".to_string()));
        }
        if self.interval_ms == 0 {
            return Err(GraphiteError::InvalidConfig("interval-ms must be greater than zero".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(GraphiteError::InvalidConfig("timeout-ms must be greater than zero".to_string()));
        }
        if self.registration_buffer == 0 {
            return Err(GraphiteError::InvalidConfig("registration-buffer must be greater than zero".to_string()));
        }
        Ok(())
    }
}
