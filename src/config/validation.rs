//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the snapshot timestamp is a digit prefix of `YYYYMMDDHHMMSS`
//! - Validate addresses, URLs and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration, collecting every failure.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a valid socket address: {:?}", config.listener.bind_address),
        });
    }

    match Url::parse(&config.archive.base_url) {
        Ok(url) if url.host_str().is_some() => {}
        _ => errors.push(ValidationError {
            field: "archive.base_url",
            message: format!("must be an absolute URL with a host, got {:?}", config.archive.base_url),
        }),
    }

    let timestamp = &config.archive.timestamp;
    if !timestamp.chars().all(|c| c.is_ascii_digit()) {
        errors.push(ValidationError {
            field: "archive.timestamp",
            message: format!("must contain only digits, got {timestamp:?}"),
        });
    }
    if timestamp.len() > 14 {
        errors.push(ValidationError {
            field: "archive.timestamp",
            message: format!("at most 14 digits (YYYYMMDDHHMMSS), got {} digits", timestamp.len()),
        });
    }

    // The name is spliced into header names, so it must itself be one.
    let name = &config.proxy.name;
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        errors.push(ValidationError {
            field: "proxy.name",
            message: format!("must be non-empty lowercase alphanumerics or hyphens, got {name:?}"),
        });
    }

    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.upstream_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
