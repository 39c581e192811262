//! g2g - Graphite metric publisher
//!
//! CLI entry point: publishes built-in process metrics until interrupted.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use g2g::cli::Cli;
use g2g::config::Config;
use g2g::vars::Int;
use g2g::wire::unix_now;
use g2g::{Graphite, Var};

/// Log to `<data_local_dir>/g2g/logs/g2g.log`; stdout stays for the operator
fn setup_logging(verbose: bool) -> Result<PathBuf> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("g2g")
        .join("logs");
    fs::create_dir_all(&log_dir).context(format!("Failed to create {}", log_dir.display()))?;

    let log_path = log_dir.join("g2g.log");
    let log_file = fs::File::create(&log_path).context(format!("Failed to create {}", log_path.display()))?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!(pid = std::process::id(), %level, "g2g starting");
    Ok(log_path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(endpoint) = cli.endpoint {
        config.graphite.endpoint = endpoint;
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.graphite.interval_ms = interval_ms;
    }
    config.validate().context("Invalid configuration")?;

    info!(
        "g2g loaded config: endpoint={}, interval_ms={}",
        config.graphite.endpoint, config.graphite.interval_ms
    );

    let graphite = Graphite::connect(config.graphite.clone())
        .await
        .context(format!("Failed to connect to {}", config.graphite.endpoint))?;

    register_builtin(&graphite, &config)?;
    println!(
        "Publishing to {} every {}ms (Ctrl-C to stop, logs in {})",
        config.graphite.endpoint,
        config.graphite.interval_ms,
        log_path.display()
    );

    tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C")?;

    info!("Interrupt received, shutting down");
    graphite.shutdown().await?;
    println!("Stopped");
    Ok(())
}

/// Register the process metrics this binary publishes
fn register_builtin(graphite: &Graphite, config: &Config) -> Result<()> {
    let metrics = &config.metrics;
    let started = Instant::now();

    let uptime: Arc<dyn Var> = Arc::new(move || started.elapsed().as_secs().to_string());
    graphite.register(metrics.metric_name("uptime_secs"), uptime)?;
    graphite.register(metrics.metric_name("pid"), Arc::new(Int::new(i64::from(std::process::id()))))?;
    graphite.register(metrics.metric_name("start_time"), Arc::new(Int::new(unix_now())))?;

    Ok(())
}
