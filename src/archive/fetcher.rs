//! Outbound archive requests.
//!
//! # Responsibilities
//! - Issue a single GET per inbound request
//! - Report the final URL after any upstream redirects
//! - Surface network failures as one error value
//!
//! # Design Decisions
//! - One shared client: connection pooling across concurrent requests
//! - Bounded timeout, no retries; a failed fetch fails its request only
//! - Compressed upstream bodies are decompressed transparently, which is
//!   why the header translator drops `content-encoding`

use std::time::Duration;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::error::ProxyResult;

/// HTTP client for the archive upstream.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: reqwest::Client,
}

impl ArchiveClient {
    /// Build the shared upstream client.
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .user_agent(upstream.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    /// GET the resolved archive URL.
    ///
    /// The returned response carries status, headers and the final URL; the
    /// body has not been read yet, so the caller chooses between streaming
    /// (binary passthrough) and buffering (textual rewrite).
    pub async fn fetch(&self, archive_url: &str) -> ProxyResult<reqwest::Response> {
        let response = self.client.get(archive_url).send().await?;
        Ok(response)
    }
}
