//! Computer Database REST API server
//!
//! Serves companies and their computer models over HTTP with hypermedia URIs.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ http::server ──▶ http::dispatcher ──▶ routing (route table)
//!                                          │
//!                                          ▼
//!                                    http::handlers ──▶ store (single lock)
//!                                          │
//!                                          ▼
//!   ◀────────────── http::response ◀── codec (JSON + hypermedia URIs)
//!   Client Response
//!
//!   Cross-cutting: config · observability · lifecycle
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use computer_database::lifecycle::{startup, Shutdown, StartupOptions};
use computer_database::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "computer-database")]
#[command(about = "REST API serving companies and their computer models", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON dataset loaded at startup (overrides the config file)
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let options = StartupOptions {
        config_path: args.config,
        dataset_path: args.dataset,
    };

    let config = startup::load_configuration(&options)?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!("computer-database v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.bind_address(),
        prefix = %config.api.prefix,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = startup::load_store(&config)?;
    let (server, listener) = startup::start(config, store).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
