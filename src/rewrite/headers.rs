//! Header translation.
//!
//! # Responsibilities
//! - Drop transport headers made stale by decompression and rewriting
//! - Filter archive-internal headers, unwrapping preserved originals
//! - Inject provenance diagnostics named after the proxy identity
//! - Resolve the outbound content-type
//!
//! # Design Decisions
//! - `x-archive-orig-*` headers carry the originally captured site's
//!   headers; they are re-emitted under their plain names
//! - `content-length` is dropped along with `content-encoding` and
//!   `transfer-encoding` so hyper recomputes framing after the body changes
//! - Duplicate headers (set-cookie and friends) are appended, not clobbered

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use chrono::Local;

/// Archive-internal header prefix; dropped unless it wraps an original.
const ARCHIVE_PREFIX: &str = "x-archive-";

/// Prefix wrapping a header of the originally captured site.
const ARCHIVE_ORIG_PREFIX: &str = "x-archive-orig-";

/// Archive's guess at the content type of an unlabeled capture.
pub const GUESSED_CONTENT_TYPE: &str = "x-archive-guessed-content-type";

/// Archive's guess at the charset of an unlabeled capture.
pub const GUESSED_CHARSET: &str = "x-archive-guessed-charset";

/// Headers that no longer describe the body once the proxy has decompressed
/// and re-buffered it.
const DROPPED: [&str; 4] = ["content-encoding", "link", "transfer-encoding", "content-length"];

/// Translates upstream header sets into outbound ones.
#[derive(Debug, Clone)]
pub struct HeaderTranslator {
    archive_url_header: HeaderName,
    request_time_header: HeaderName,
    request_url_header: HeaderName,
}

impl HeaderTranslator {
    /// Build a translator for the given proxy identity.
    ///
    /// The name was validated as a header-name fragment at startup.
    pub fn new(proxy_name: &str) -> Self {
        let diagnostic = |suffix: &str| {
            HeaderName::from_bytes(format!("x-{proxy_name}-{suffix}").as_bytes())
                .expect("validated proxy name forms a header name")
        };
        Self {
            archive_url_header: diagnostic("archive-url"),
            request_time_header: diagnostic("request-time"),
            request_url_header: diagnostic("request-url"),
        }
    }

    /// Build the outbound header map from the upstream one.
    ///
    /// `archive_url` is the final URL actually fetched (after redirects);
    /// `request_url` is the original inbound request URL.
    pub fn translate(&self, upstream: &HeaderMap, archive_url: &str, request_url: &str) -> HeaderMap {
        let mut out = HeaderMap::with_capacity(upstream.len() + 4);

        for (name, value) in upstream {
            // HeaderName is always lowercase.
            let name_str = name.as_str();
            if DROPPED.contains(&name_str) {
                continue;
            }
            if let Some(orig) = name_str.strip_prefix(ARCHIVE_ORIG_PREFIX) {
                match HeaderName::from_bytes(orig.as_bytes()) {
                    Ok(unwrapped) => {
                        out.append(unwrapped, value.clone());
                    }
                    Err(_) => {
                        tracing::debug!(header = name_str, "Skipping unmappable preserved header");
                    }
                }
                continue;
            }
            if name_str.starts_with(ARCHIVE_PREFIX) {
                continue;
            }
            out.append(name.clone(), value.clone());
        }

        insert_str(&mut out, &self.archive_url_header, archive_url);
        let now = Local::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string();
        insert_str(&mut out, &self.request_time_header, &now);
        insert_str(&mut out, &self.request_url_header, request_url);

        resolve_content_type(upstream, &mut out);
        out
    }
}

/// If the upstream sent no explicit content-type, synthesize one from the
/// archive's guesses; both the type and the charset guess must be present.
fn resolve_content_type(upstream: &HeaderMap, out: &mut HeaderMap) {
    if upstream.contains_key(header::CONTENT_TYPE) {
        // Copied through verbatim by the main loop.
        return;
    }

    let guessed_type = upstream.get(GUESSED_CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let guessed_charset = upstream.get(GUESSED_CHARSET).and_then(|v| v.to_str().ok());

    if let (Some(mime), Some(charset)) = (guessed_type, guessed_charset) {
        if let Ok(value) = HeaderValue::from_str(&format!("{mime}; charset={charset}")) {
            out.insert(header::CONTENT_TYPE, value);
        }
    }
}

fn insert_str(out: &mut HeaderMap, name: &HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            out.insert(name.clone(), value);
        }
        Err(_) => {
            tracing::debug!(header = %name, "Skipping diagnostic header with invalid value");
        }
    }
}
