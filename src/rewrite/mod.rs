//! Response rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! Classified upstream response
//!     → headers.rs (drop stale/internal headers, unwrap preserved
//!       originals, inject provenance diagnostics, resolve content-type)
//!     → body.rs (textual only: decode, strip rewrite artifacts, re-encode)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Translators are compiled once at startup from the validated config
//!   and shared immutably across requests
//! - Binary bodies bypass body.rs entirely and stream through untouched

pub mod body;
pub mod headers;

pub use body::BodyRewriter;
pub use headers::HeaderTranslator;
