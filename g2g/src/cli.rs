//! CLI definition

use clap::Parser;
use std::path::PathBuf;

/// g2g - push process metrics to a Graphite collector
#[derive(Parser)]
#[command(
    name = "g2g",
    about = "Periodically publish metrics to a Graphite plaintext collector",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Logs are written to: ~/.local/share/g2g/logs/g2g.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Collector address, overrides the config file
    #[arg(short, long, value_name = "HOST:PORT")]
    pub endpoint: Option<String>,

    /// Publish interval in milliseconds, overrides the config file
    #[arg(short, long, value_name = "MS")]
    pub interval_ms: Option<u64>,
}
