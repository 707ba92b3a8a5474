//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check that the public base URL and metrics address parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ConfigViolation>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigViolation {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn violation(field: &'static str, message: impl Into<String>) -> ConfigViolation {
    ConfigViolation {
        field,
        message: message.into(),
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ConfigViolation>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(violation("listener.host", "must not be empty"));
    }
    if config.listener.port == 0 {
        errors.push(violation("listener.port", "must be non-zero"));
    }

    let prefix = &config.api.prefix;
    if !prefix.is_empty() {
        if !prefix.starts_with('/') {
            errors.push(violation("api.prefix", "must start with '/'"));
        }
        if prefix.ends_with('/') {
            errors.push(violation("api.prefix", "must not end with '/'"));
        }
    }

    let base_url = format!("http://{}:{}{}", config.listener.host, config.listener.port, prefix);
    if let Err(e) = url::Url::parse(&base_url) {
        errors.push(violation("listener", format!("base URL `{}` is invalid: {}", base_url, e)));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(violation("timeouts.request_secs", "must be greater than 0"));
    }
    if config.limits.max_body_size == 0 {
        errors.push(violation("limits.max_body_size", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(violation(
            "observability.metrics_address",
            format!("`{}` is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
