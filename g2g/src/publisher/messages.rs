//! Message types for the publisher task

use std::fmt;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::vars::Var;

/// Requests sent to the publisher task
pub(crate) enum PublisherRequest {
    /// Add or replace a published value
    Register { name: String, var: Arc<dyn Var> },

    /// Close the connection, acknowledge, and stop
    Shutdown { ack: oneshot::Sender<()> },
}

impl fmt::Debug for PublisherRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublisherRequest::Register { name, .. } => f.debug_struct("Register").field("name", name).finish(),
            PublisherRequest::Shutdown { .. } => f.write_str("Shutdown"),
        }
    }
}

/// Outcome of one publish pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PassReport {
    /// Metrics in the registry when the pass started
    pub attempted: usize,
    pub sent: usize,
    pub failed: usize,
}
