//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Initialize subsystems → Serve
//!
//! Shutdown:
//!     signals.rs (SIGTERM / ctrl-c) → shutdown.rs (broadcast)
//!     → server stops accepting, in-flight requests drain
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
