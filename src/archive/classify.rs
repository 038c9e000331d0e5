//! Upstream response classification.
//!
//! # Responsibilities
//! - Detect the archive's own "no capture near this timestamp" signal
//! - Decide whether a response body is rewritable text
//!
//! # Design Decisions
//! - The miss signal is a diagnostic header (`x-ts: 404`) distinct from the
//!   HTTP status code; it wins over everything else
//! - Content-type prefix match is case-sensitive; a missing content-type is
//!   binary at this stage (the header translator may still synthesize one
//!   from the archive's guesses)

use axum::http::{header, HeaderMap};

/// Header the archive sets to `404` when no capture exists near the
/// requested timestamp.
pub const TIMESTAMP_STATUS: &str = "x-ts";

/// Content-type prefixes whose bodies go through the rewriter.
const TEXTUAL_PREFIXES: [&str; 2] = ["text/html", "text/plain"];

/// What to do with an upstream response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The archive has no capture of this URL near the target timestamp.
    SnapshotMiss,
    /// Rewritable text; the body is buffered and filtered.
    Textual,
    /// Everything else; bytes pass through untouched.
    Binary,
}

/// Classify an upstream response from its headers alone.
pub fn classify(headers: &HeaderMap) -> Classification {
    if headers
        .get(TIMESTAMP_STATUS)
        .is_some_and(|v| v.as_bytes() == b"404")
    {
        return Classification::SnapshotMiss;
    }

    let textual = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| TEXTUAL_PREFIXES.iter().any(|p| ct.starts_with(p)));

    if textual {
        Classification::Textual
    } else {
        Classification::Binary
    }
}
