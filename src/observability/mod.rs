//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce structured tracing events
//!     → logging.rs (subscriber setup, env-filter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - A request correlation id (inbound x-request-id, or a generated UUID)
//!   is attached to every event a request produces
//! - RUST_LOG wins over the configured level when set

pub mod logging;
