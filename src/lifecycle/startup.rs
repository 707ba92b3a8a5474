//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Load the dataset snapshot into the store
//! - Build the server and bind its listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when ready)

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, validate_config, ConfigError, ServerConfig};
use crate::http::HttpServer;
use crate::routing::TemplateError;
use crate::store::{load_snapshot, ResourceStore, SnapshotError};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("dataset: {0}")]
    Dataset(#[from] SnapshotError),

    #[error("route table: {0}")]
    Routes(#[from] TemplateError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Command-line inputs that shape startup.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// TOML configuration file; defaults apply when absent.
    pub config_path: Option<PathBuf>,
    /// Dataset file overriding `[dataset] path`.
    pub dataset_path: Option<PathBuf>,
}

/// Load the configuration and apply command-line overrides.
pub fn load_configuration(options: &StartupOptions) -> Result<ServerConfig, StartupError> {
    let mut config = match &options.config_path {
        Some(path) => load_config(path)?,
        None => {
            let config = ServerConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };

    if let Some(dataset) = &options.dataset_path {
        config.dataset.path = Some(dataset.to_string_lossy().into_owned());
    }
    Ok(config)
}

/// Build the store from the configured dataset, or empty when none is set.
pub fn load_store(config: &ServerConfig) -> Result<ResourceStore, StartupError> {
    match &config.dataset.path {
        Some(path) => Ok(load_snapshot(Path::new(path))?),
        None => {
            tracing::info!("No dataset configured, starting with an empty store");
            Ok(ResourceStore::new())
        }
    }
}

/// Build the server and bind its listener.
pub async fn start(
    config: ServerConfig,
    store: ResourceStore,
) -> Result<(HttpServer, TcpListener), StartupError> {
    let address = config.bind_address();
    let server = HttpServer::new(config, store)?;
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;
    Ok((server, listener))
}
