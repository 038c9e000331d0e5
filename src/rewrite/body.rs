//! Body rewriting for textual archive responses.
//!
//! # Responsibilities
//! - Decode the capture using the archive's guessed charset
//! - Strip the archive's link-rewriting artifacts and injected script block
//! - Re-encode as UTF-8
//!
//! # Design Decisions
//! - Pattern substitution over text, not an HTML parser; the exact pattern
//!   semantics are load-bearing for compatibility, so they are preserved
//!   even where they under- or over-strip
//! - Decoding is lossy (invalid sequences become U+FFFD); an unknown
//!   charset label falls back to UTF-8
//! - The outbound `charset=` parameter is left untouched even though the
//!   body is re-encoded as UTF-8

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Marker comment terminating the archive's injected script block.
const REWRITE_JS_END: &str = "<!-- End Wayback Rewrite JS Include -->";

/// Strips archive rewrite artifacts from textual response bodies.
#[derive(Debug, Clone)]
pub struct BodyRewriter {
    /// `https://<host>/` anywhere in the text, any case.
    secure_host: Regex,
    /// Replacement for `secure_host`: the bare, non-secure origin.
    plain_origin: String,
    /// Embedded snapshot path segments, optionally host-prefixed.
    snapshot_segment: Regex,
    /// Whitespace preceding the first `<`.
    leading_whitespace: Regex,
    /// Injected block between the opening `<head>` tag and the end marker.
    head_block: Regex,
    /// Same, anchored at `<html>` when the page has no `<head>`.
    html_block: Regex,
}

impl BodyRewriter {
    /// Compile the rewrite patterns for the given archive host.
    pub fn new(host: &str) -> Self {
        let host_pattern = regex::escape(host);
        let marker = regex::escape(REWRITE_JS_END);
        let compiled = |pattern: &str| Regex::new(pattern).expect("host-parameterized pattern compiles");
        Self {
            secure_host: compiled(&format!(r"(?i)https://{host_pattern}/")),
            plain_origin: format!("http://{host}/"),
            snapshot_segment: compiled(&format!(r"(https?://{host_pattern})?/web/\d+(/|fw_/)")),
            leading_whitespace: compiled(r"^[\s\t\r\n]+<"),
            head_block: compiled(&format!(r"(?is)(<head[^>]*>).*{marker}")),
            html_block: compiled(&format!(r"(?is)(<html[^>]*>).*{marker}")),
        }
    }

    /// Apply the artifact-stripping substitutions to decoded text.
    ///
    /// Order matters: self-references are downgraded to the plain scheme
    /// first, then snapshot segments are cut out of every URL, then the
    /// injected script block is removed (keeping its opening tag).
    pub fn rewrite(&self, body: &str) -> String {
        let body = self.secure_host.replace_all(body, self.plain_origin.as_str());
        let body = self.snapshot_segment.replace_all(&body, "");
        let body = self.leading_whitespace.replace(&body, "<");
        let body = self.head_block.replace(&body, "$1");
        let body = self.html_block.replace(&body, "$1");
        body.into_owned()
    }

    /// Decode, rewrite and re-encode a textual body.
    ///
    /// `charset` is the archive's guess for the capture; output is always
    /// UTF-8.
    pub fn rewrite_bytes(&self, body: &[u8], charset: Option<&str>) -> Vec<u8> {
        let encoding = charset
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
        let (text, used, had_errors) = encoding.decode(body);
        if had_errors {
            tracing::debug!(charset = used.name(), "Lossy decode of upstream body");
        }
        self.rewrite(&text).into_bytes()
    }
}
