//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits and carry defaults so a missing or minimal
//! config file is valid.

use serde::{Deserialize, Serialize};
use url::Url;

/// Fallback snapshot timestamp: midnight, January 1st 1998.
///
/// A partially configured timestamp is right-padded from this constant to
/// form a full 14-digit `YYYYMMDDHHMMSS` value.
pub const TIMESTAMP_FALLBACK: &str = "19980101000000";

/// Root configuration for the snapshot proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Archive backend and target snapshot.
    pub archive: ArchiveConfig,

    /// Proxy identity used in diagnostic headers and error bodies.
    pub proxy: IdentityConfig,

    /// Outbound request settings.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Archive backend selection. A single backend; the proxy pins every
/// request to one snapshot timestamp against it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Scheme + host of the archive service.
    pub base_url: String,

    /// Target snapshot timestamp: a digit string of length 0-14, read as a
    /// prefix of `YYYYMMDDHHMMSS`. Missing trailing digits come from
    /// [`TIMESTAMP_FALLBACK`].
    pub timestamp: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: "https://web.archive.org".to_string(),
            timestamp: String::new(),
        }
    }
}

impl ArchiveConfig {
    /// The effective 14-digit snapshot timestamp: configured digits padded
    /// on the right from [`TIMESTAMP_FALLBACK`].
    pub fn effective_timestamp(&self) -> String {
        let suffix = TIMESTAMP_FALLBACK.get(self.timestamp.len()..).unwrap_or("");
        format!("{}{}", self.timestamp, suffix)
    }

    /// Host (and port, if any) component of `base_url`.
    ///
    /// Returns `None` when `base_url` does not parse; validation rejects
    /// such configs before they reach the request path.
    pub fn host(&self) -> Option<String> {
        let url = Url::parse(&self.base_url).ok()?;
        let host = url.host_str()?;
        Some(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }
}

/// Proxy identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Name embedded in diagnostic header names (`x-<name>-archive-url`)
    /// and error bodies. Lowercase alphanumerics and hyphens only.
    pub name: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: "timeprox".to_string(),
        }
    }
}

/// Outbound request settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// User-Agent sent to the archive.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("timeprox/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream fetch timeout in seconds. There are no retries; a timed-out
    /// fetch fails its request.
    pub upstream_secs: u64,

    /// Total request timeout (inbound side) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_secs: 30,
            request_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
