//! Snapshot proxy library: serves a fixed point-in-time view of the web
//! through a public archive, with the archive's own rewrite artifacts
//! stripped back out.

pub mod archive;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rewrite;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
