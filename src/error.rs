//! Request-handling error definitions.

use thiserror::Error;

/// Errors that can occur while proxying a single request.
///
/// Every failure is terminal for its request; there are no retries and no
/// effect on other in-flight requests.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The archive could not be reached, timed out, or returned a response
    /// whose body could not be read. Surfaced to the client as a 500.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// Result type for request handling.
pub type ProxyResult<T> = Result<T, ProxyError>;
