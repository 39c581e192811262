//! In-memory dialer for publisher tests

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, DuplexStream};

use super::connection::Dialer;

#[derive(Default)]
struct MockState {
    refuse: bool,
    dials: usize,
    peers: Vec<DuplexStream>,
}

/// Dialer handing out `tokio::io::duplex` pairs; keeps the collector side
#[derive(Clone)]
pub(crate) struct MockDialer {
    buf_size: usize,
    state: Arc<Mutex<MockState>>,
}

impl MockDialer {
    pub(crate) fn new(buf_size: usize) -> Self {
        Self {
            buf_size,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Make subsequent dials fail with ConnectionRefused
    pub(crate) fn refuse(&self, refuse: bool) {
        self.state.lock().unwrap().refuse = refuse;
    }

    /// Number of dial attempts so far, successful or not
    pub(crate) fn dials(&self) -> usize {
        self.state.lock().unwrap().dials
    }

    /// Drop every collector side, breaking the live streams
    pub(crate) fn drop_peers(&self) {
        self.state.lock().unwrap().peers.clear();
    }

    /// Collector sides in dial order
    pub(crate) fn take_peers(&self) -> Vec<DuplexStream> {
        std::mem::take(&mut self.state.lock().unwrap().peers)
    }
}

#[async_trait]
impl Dialer for MockDialer {
    type Stream = DuplexStream;

    async fn dial(&self, _endpoint: &str) -> io::Result<DuplexStream> {
        let mut state = self.state.lock().unwrap();
        state.dials += 1;
        if state.refuse {
            return Err(io::Error::from(io::ErrorKind::ConnectionRefused));
        }
        let (client, collector) = tokio::io::duplex(self.buf_size);
        state.peers.push(collector);
        Ok(client)
    }
}

/// Read until the publisher side closes
pub(crate) async fn read_all(peer: &mut DuplexStream) -> String {
    let mut text = String::new();
    peer.read_to_string(&mut text).await.unwrap();
    text
}
