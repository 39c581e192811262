//! Graphite / GraphiteHandle - client interface to the publisher task

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::config::GraphiteConfig;
use super::connection::{Dialer, TcpDialer};
use super::core::Publisher;
use super::messages::PublisherRequest;
use crate::error::GraphiteError;
use crate::vars::Var;

/// Cloneable handle for registering metrics
///
/// Registration never blocks: the request is queued for the publisher task
/// and applied there.
#[derive(Clone)]
pub struct GraphiteHandle {
    tx: mpsc::Sender<PublisherRequest>,
    capacity: usize,
}

impl GraphiteHandle {
    fn new(tx: mpsc::Sender<PublisherRequest>, capacity: usize) -> Self {
        Self { tx, capacity }
    }

    /// Publish `var` under `name` on every pass, replacing any earlier
    /// registration of the same name
    ///
    /// Fails with [`GraphiteError::Closed`] once the publisher has shut down
    /// and with [`GraphiteError::QueueFull`] if the publisher is that far
    /// behind.
    pub fn register(&self, name: impl Into<String>, var: Arc<dyn Var>) -> Result<(), GraphiteError> {
        let name = name.into();
        debug!(metric = %name, "GraphiteHandle::register: called");

        self.tx
            .try_send(PublisherRequest::Register { name, var })
            .map_err(|e| match e {
                TrySendError::Full(req) => {
                    warn!(?req, capacity = self.capacity, "Registration queue full, dropping");
                    GraphiteError::QueueFull {
                        capacity: self.capacity,
                    }
                }
                TrySendError::Closed(req) => {
                    warn!(?req, "Registration after shutdown, dropping");
                    GraphiteError::Closed
                }
            })
    }

    /// True once the publisher task has stopped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owner of a running publisher
///
/// Created with a live connection; dropping it (and every handle) stops the
/// publisher, but only [`Graphite::shutdown`] waits for the connection to be
/// closed.
pub struct Graphite {
    handle: GraphiteHandle,
    task: JoinHandle<()>,
}

impl Graphite {
    /// Connect over TCP and start publishing
    ///
    /// Fails without starting anything if the endpoint cannot be reached.
    pub async fn connect(config: GraphiteConfig) -> Result<Self, GraphiteError> {
        Self::connect_with(config, TcpDialer).await
    }

    /// Connect with a custom dialer and start publishing
    pub async fn connect_with<D: Dialer>(config: GraphiteConfig, dialer: D) -> Result<Self, GraphiteError> {
        debug!(endpoint = %config.endpoint, "Graphite::connect_with: called");
        let (publisher, tx) = Publisher::new(&config, dialer).await?;
        let task = tokio::spawn(publisher.run());

        info!(
            endpoint = %config.endpoint,
            interval_ms = config.interval_ms,
            timeout_ms = config.timeout_ms,
            "Graphite publisher running"
        );
        Ok(Self {
            handle: GraphiteHandle::new(tx, config.registration_buffer),
            task,
        })
    }

    /// Get a cloneable registration handle
    pub fn handle(&self) -> GraphiteHandle {
        self.handle.clone()
    }

    /// See [`GraphiteHandle::register`]
    pub fn register(&self, name: impl Into<String>, var: Arc<dyn Var>) -> Result<(), GraphiteError> {
        self.handle.register(name, var)
    }

    /// Stop publishing and wait until the connection is closed
    ///
    /// Registrations queued before this call are applied first. No writes
    /// happen after it returns.
    pub async fn shutdown(self) -> Result<(), GraphiteError> {
        debug!("Graphite::shutdown: called");
        let (ack_tx, ack_rx) = oneshot::channel();

        self.handle
            .tx
            .send(PublisherRequest::Shutdown { ack: ack_tx })
            .await
            .map_err(|_| GraphiteError::Closed)?;

        debug!("Graphite::shutdown: waiting for acknowledgment");
        ack_rx.await.map_err(|_| GraphiteError::Closed)?;

        if let Err(e) = self.task.await {
            warn!(error = %e, "Publisher task ended abnormally");
        }
        info!("Graphite publisher shut down");
        Ok(())
    }
}
