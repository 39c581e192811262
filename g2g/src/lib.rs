//! g2g - periodic metric publisher for Graphite
//!
//! Register named values once; a background task writes their current
//! state to a Graphite plaintext collector on a fixed interval, redialing
//! on demand when the connection drops.
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use g2g::{Graphite, GraphiteConfig, vars::Float};
//!
//! let config = GraphiteConfig::new("stats:2003", Duration::from_secs(10), Duration::from_secs(1));
//! let graphite = Graphite::connect(config).await?;
//!
//! let load = Arc::new(Float::new(0.5));
//! graphite.register("load", load.clone())?;
//!
//! // ... later
//! graphite.shutdown().await?;
//! ```
//!
//! # Modules
//!
//! - [`publisher`] - Publisher task, connection and scheduling
//! - [`vars`] - Values that can be registered
//! - [`wire`] - Graphite line format
//! - [`config`] - Application configuration and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod publisher;
pub mod vars;
pub mod wire;

// Re-export commonly used types
pub use config::{Config, MetricsConfig};
pub use error::GraphiteError;
pub use publisher::{Dialer, Graphite, GraphiteConfig, GraphiteHandle, TcpDialer};
pub use vars::{Float, Int, Text, Var};
