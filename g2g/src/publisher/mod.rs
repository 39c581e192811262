//! Publisher task for pushing metrics to a Graphite collector
//!
//! A single task owns the registry, the connection and the publish timer.
//! Callers never touch that state directly; they send requests:
//! - **Register:** add or replace a named value (fire-and-forget)
//! - **Shutdown:** close the connection and stop, acknowledged to the caller
//!
//! On each interval the task renders every registered value and writes one
//! line per metric. A failed metric is logged and skipped; the pass goes on.
//!
//! The task itself is internal. Only the owner and its handles can reach it,
//! so there is no way to force a pass from outside:
//!
//! ```compile_fail
//! use g2g::publisher::Publisher;
//! ```
//!
//! ```compile_fail
//! use g2g::publisher::Connection;
//! ```

mod config;
mod connection;
mod core;
mod handle;
mod messages;
mod registry;
mod schedule;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::GraphiteConfig;
pub use connection::{Dialer, TcpDialer};
pub use handle::{Graphite, GraphiteHandle};
