//! Outbound connection to the collector
//!
//! Holds at most one live stream. A send with no stream makes exactly one
//! dial attempt; a failed write drops the stream so the next send redials.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::error::GraphiteError;
use crate::wire::{format_line, unix_now};

/// Opens streams to an endpoint
#[async_trait]
pub trait Dialer: Send + Sync + 'static {
    type Stream: AsyncWrite + Unpin + Send + 'static;

    async fn dial(&self, endpoint: &str) -> io::Result<Self::Stream>;
}

/// Plain TCP dialer
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

#[async_trait]
impl Dialer for TcpDialer {
    type Stream = TcpStream;

    async fn dial(&self, endpoint: &str) -> io::Result<TcpStream> {
        let stream = TcpStream::connect(endpoint).await?;
        // One small line per write; don't let Nagle hold them back
        stream.set_nodelay(true)?;
        Ok(stream)
    }
}

/// Connection state owned by the publisher task
pub(crate) struct Connection<D: Dialer> {
    dialer: D,
    endpoint: String,
    timeout: Duration,
    stream: Option<D::Stream>,
}

impl<D: Dialer> Connection<D> {
    /// Dial eagerly; fails if the endpoint is unreachable
    pub(crate) async fn open(dialer: D, endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GraphiteError> {
        let mut conn = Self {
            dialer,
            endpoint: endpoint.into(),
            timeout,
            stream: None,
        };
        conn.reconnect().await?;
        Ok(conn)
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[cfg(test)]
    pub(crate) fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Dial the endpoint and replace any existing stream
    pub(crate) async fn reconnect(&mut self) -> Result<(), GraphiteError> {
        debug!(endpoint = %self.endpoint, "Connection::reconnect: called");
        self.stream = None;
        let stream = self
            .dialer
            .dial(&self.endpoint)
            .await
            .map_err(|source| GraphiteError::Connect {
                endpoint: self.endpoint.clone(),
                source,
            })?;
        self.stream = Some(stream);
        info!(endpoint = %self.endpoint, "Connected to collector");
        Ok(())
    }

    /// Send one metric line, redialing once if there is no stream
    pub(crate) async fn send(&mut self, name: &str, value: &str) -> Result<(), GraphiteError> {
        if self.stream.is_none() {
            self.reconnect().await?;
        }

        let line = format_line(name, value, unix_now());
        let result = self.write_line(line.as_bytes()).await;
        if result.is_err() {
            debug!(endpoint = %self.endpoint, "Connection::send: dropping stream after failed write");
            self.stream = None;
        }
        result
    }

    async fn write_line(&mut self, line: &[u8]) -> Result<(), GraphiteError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(GraphiteError::Write(io::Error::from(io::ErrorKind::NotConnected)));
        };

        // Single write call: a partial line is reported, not completed
        let written = match tokio::time::timeout(self.timeout, stream.write(line)).await {
            Err(_) => return Err(GraphiteError::WriteTimeout { timeout: self.timeout }),
            Ok(Err(e)) => return Err(GraphiteError::Write(e)),
            Ok(Ok(n)) => n,
        };

        if written != line.len() {
            return Err(GraphiteError::ShortWrite {
                written,
                expected: line.len(),
            });
        }
        Ok(())
    }

    /// Shut the stream down and forget it
    pub(crate) async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                debug!(endpoint = %self.endpoint, error = %e, "Connection::close: shutdown failed");
            }
            info!(endpoint = %self.endpoint, "Connection closed");
        }
    }
}
