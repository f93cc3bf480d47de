//! Gatehouse node entry point.

use anyhow::Context;
use clap::Parser;
use gatehouse_accounts::AccountStore;
use gatehouse_node::api::{create_router_with_timeout, AppState};
use gatehouse_node::config::NodeConfig;
use gatehouse_node::observability::{init_logging, LogFormat};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Gatehouse - credential login and bearer token service
#[derive(Parser, Debug)]
#[command(name = "gatehouse-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API listen address
    #[arg(long)]
    api_addr: Option<SocketAddr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config =
        NodeConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(addr) = args.api_addr {
        config.api_addr = addr;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(format) = args.log_format {
        config.log_format = format;
    }

    init_logging(&config.log_level, config.log_format());

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_addr = %config.api_addr,
        json_logs = config.log_format() == LogFormat::Json,
        "Starting Gatehouse node"
    );

    let auth_config = config.to_auth_config()?;
    let state = AppState::new(AccountStore::open(), &auth_config)
        .context("failed to initialize authentication")?;
    let app = create_router_with_timeout(state.clone(), config.request_timeout());

    let listener = tokio::net::TcpListener::bind(config.api_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.api_addr))?;
    tracing::info!(addr = %config.api_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    state.shutdown();
    tracing::info!("Gatehouse node stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
