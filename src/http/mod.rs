//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route, per-request orchestration)
//!     → archive layer (resolve, fetch, classify)
//!     → rewrite layer (headers, body)
//!     → response.rs (assemble, or diagnostic error body)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
