//! Main publisher task implementation

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::config::GraphiteConfig;
use super::connection::{Connection, Dialer};
use super::messages::{PassReport, PublisherRequest};
use super::registry::Registry;
use super::schedule::Schedule;
use crate::error::GraphiteError;
use crate::vars::Var;

/// The publisher owns the registry, the connection and the schedule.
///
/// Everything it owns is touched only from [`Publisher::run`]; callers talk
/// to it through the request channel.
pub(crate) struct Publisher<D: Dialer> {
    registry: Registry,
    connection: Connection<D>,
    schedule: Schedule,
    rx: mpsc::Receiver<PublisherRequest>,
}

impl<D: Dialer> Publisher<D> {
    /// Dial the endpoint and build a publisher with an empty registry
    ///
    /// Returns the sender half of the request channel alongside it.
    pub(crate) async fn new(
        config: &GraphiteConfig,
        dialer: D,
    ) -> Result<(Self, mpsc::Sender<PublisherRequest>), GraphiteError> {
        debug!(endpoint = %config.endpoint, "Publisher::new: called");
        config.validate()?;

        let connection = Connection::open(dialer, config.endpoint.clone(), config.timeout()).await?;
        let (tx, rx) = mpsc::channel(config.registration_buffer);

        let publisher = Self {
            registry: Registry::new(),
            connection,
            schedule: Schedule::new(config.interval(), Instant::now()),
            rx,
        };
        Ok((publisher, tx))
    }

    /// Run the publisher task
    ///
    /// This consumes the Publisher and runs until shutdown is requested or
    /// every sender has been dropped.
    pub(crate) async fn run(mut self) {
        info!(endpoint = %self.connection.endpoint(), "Publisher started");

        loop {
            let deadline = self.schedule.next_deadline();
            debug!(delay = ?self.schedule.delay_from(Instant::now()), "Waiting for next pass");

            tokio::select! {
                req = self.rx.recv() => match req {
                    Some(PublisherRequest::Register { name, var }) => self.register(name, var),
                    Some(PublisherRequest::Shutdown { ack }) => {
                        info!("Publisher shutting down");
                        self.connection.close().await;
                        let _ = ack.send(());
                        break;
                    }
                    None => {
                        info!("All publisher handles dropped, shutting down");
                        self.connection.close().await;
                        break;
                    }
                },

                _ = tokio::time::sleep_until(deadline) => {
                    self.publish_all().await;
                }
            }
        }

        info!("Publisher stopped");
    }

    fn register(&mut self, name: String, var: Arc<dyn Var>) {
        debug!(metric = %name, "Registering metric");
        if self.registry.insert(name.clone(), var) {
            debug!(metric = %name, "Replaced existing registration");
        }
    }

    /// Send every registered metric once, then advance the schedule
    pub(crate) async fn publish_all(&mut self) -> PassReport {
        let mut report = PassReport::default();

        for (name, var) in self.registry.snapshot() {
            report.attempted += 1;
            let value = var.render();
            match self.connection.send(&name, &value).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    report.failed += 1;
                    warn!(metric = %name, error = %e, "Failed to publish metric");
                }
            }
        }

        self.schedule.mark_published(Instant::now());
        debug!(
            attempted = report.attempted,
            sent = report.sent,
            failed = report.failed,
            "Publish pass complete"
        );
        report
    }
}
