//! Configuration loading from disk and environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration: an optional TOML file, then environment overrides,
/// then semantic validation. A missing path yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = fs::read_to_string(p).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// `PORT` and `ARCHIVE_TIME` override the file, matching the variable names
/// the original deployment used.
fn apply_env_overrides(config: &mut ProxyConfig) {
    if let Ok(port) = std::env::var("PORT") {
        if !port.is_empty() {
            match (port.parse::<u16>(), config.listener.bind_address.parse::<SocketAddr>()) {
                (Ok(port), Ok(mut addr)) => {
                    addr.set_port(port);
                    config.listener.bind_address = addr.to_string();
                }
                _ => tracing::warn!(port = %port, "Ignoring unusable PORT override"),
            }
        }
    }

    if let Ok(timestamp) = std::env::var("ARCHIVE_TIME") {
        if !timestamp.is_empty() {
            config.archive.timestamp = timestamp;
        }
    }
}
