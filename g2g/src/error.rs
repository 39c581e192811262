//! Publisher error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while connecting, publishing or registering
#[derive(Debug, Error)]
pub enum GraphiteError {
    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Write failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("Write timed out after {timeout:?}")]
    WriteTimeout { timeout: Duration },

    #[error("Short write: {written}/{expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[error("Publisher has shut down")]
    Closed,

    #[error("Registration queue full ({capacity} pending)")]
    QueueFull { capacity: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl GraphiteError {
    /// Dial, transport or deadline failure
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            GraphiteError::Connect { .. } | GraphiteError::Write(_) | GraphiteError::WriteTimeout { .. }
        )
    }

    /// The write call reported success but did not take the whole line
    pub fn is_short_write(&self) -> bool {
        matches!(self, GraphiteError::ShortWrite { .. })
    }
}
