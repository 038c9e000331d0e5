//! Snapshot URL resolution.
//!
//! # Responsibilities
//! - Detect archive-shaped request paths and pass them through unchanged
//! - Wrap everything else in a snapshot URL for the target timestamp
//!
//! # Design Decisions
//! - Pure and deterministic: no clock, no I/O, no caching
//! - Archive-shaped paths (a client re-requesting a link the body rewriter
//!   left behind, or a resource path the archive itself embedded) are never
//!   re-prefixed, which would double-wrap them

use regex::Regex;

use crate::config::ArchiveConfig;

/// Maps inbound request URLs onto concrete archive snapshot URLs.
#[derive(Debug, Clone)]
pub struct SnapshotResolver {
    base_url: String,
    timestamp: String,
    archive_shaped: Regex,
}

impl SnapshotResolver {
    /// Build a resolver from the validated archive configuration.
    pub fn new(archive: &ArchiveConfig) -> Self {
        Self {
            base_url: archive.base_url.trim_end_matches('/').to_string(),
            timestamp: archive.effective_timestamp(),
            archive_shaped: Regex::new(r"^/web/\d+((fw|im)_)?/").expect("hard-coded pattern compiles"),
        }
    }

    /// Resolve the archive URL to fetch for an inbound request.
    ///
    /// `path` is the request path alone; `request_url` is the full original
    /// URL including scheme, host, path and query. Archive-shaped paths go
    /// through verbatim (query dropped); anything else is wrapped in a
    /// snapshot URL embedding the effective timestamp.
    pub fn resolve(&self, path: &str, request_url: &str) -> String {
        if self.archive_shaped.is_match(path) {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/web/{}/{}", self.base_url, self.timestamp, request_url)
        }
    }

    /// The effective 14-digit timestamp this resolver pins requests to.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TIMESTAMP_FALLBACK;

    fn resolver(timestamp: &str) -> SnapshotResolver {
        SnapshotResolver::new(&ArchiveConfig {
            base_url: "https://web.archive.org".to_string(),
            timestamp: timestamp.to_string(),
        })
    }

    #[test]
    fn test_archive_shaped_paths_pass_through() {
        let r = resolver("1998");
        assert_eq!(
            r.resolve("/web/19980101000000/http://example.com/", "http://localhost/web/19980101000000/http://example.com/"),
            "https://web.archive.org/web/19980101000000/http://example.com/"
        );
        // Resource-flavored snapshot paths keep their suffix markers.
        assert_eq!(
            r.resolve("/web/19980101000000fw_/frame.html", "unused"),
            "https://web.archive.org/web/19980101000000fw_/frame.html"
        );
        assert_eq!(
            r.resolve("/web/19980101000000im_/logo.gif", "unused"),
            "https://web.archive.org/web/19980101000000im_/logo.gif"
        );
    }

    #[test]
    fn test_non_digit_web_path_is_not_archive_shaped() {
        let r = resolver("1998");
        assert_eq!(
            r.resolve("/web/about/", "http://example.com/web/about/"),
            "https://web.archive.org/web/19980101000000/http://example.com/web/about/"
        );
    }

    #[test]
    fn test_wraps_plain_urls_with_timestamp() {
        let r = resolver("2005");
        assert_eq!(
            r.resolve("/index.html", "http://example.com/index.html?q=1"),
            "https://web.archive.org/web/20050101000000/http://example.com/index.html?q=1"
        );
    }

    #[test]
    fn test_timestamp_padding_takes_fallback_tail() {
        for ts in ["", "19", "1998", "199807", "19980722", "19980722061331"] {
            let r = resolver(ts);
            let expected = format!("{}{}", ts, &TIMESTAMP_FALLBACK[ts.len()..]);
            assert_eq!(r.timestamp(), expected);
            assert_eq!(expected.len(), 14);
        }
    }
}
