//! Utility functions for URL resolution, text cleanup, and file system checks.
//!
//! This module provides helper functions shared by both feed pipelines:
//! - Absolute URL resolution for links and images found in markup
//! - Whitespace collapsing for display strings
//! - File system validation for the output directory

use itertools::Itertools;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Resolve a URL found in markup to an absolute URL.
///
/// # Arguments
///
/// * `candidate` - The raw attribute value, if the attribute was present
/// * `base` - The page the value was found on
///
/// # Returns
///
/// - `Ok(None)` when there is no candidate or it is blank
/// - the candidate unchanged when it already starts with `http://` or `https://`
/// - otherwise the candidate joined onto `base`
///
/// # Errors
///
/// Propagates the [`url::ParseError`] if the candidate cannot be joined.
///
/// # Examples
///
/// ```ignore
/// let base = Url::parse("https://site.tld/p")?;
/// assert_eq!(to_absolute(Some("/a/b"), &base)?, Some("https://site.tld/a/b".into()));
/// ```
pub fn to_absolute(candidate: Option<&str>, base: &Url) -> Result<Option<String>, url::ParseError> {
    let Some(raw) = candidate.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if has_http_scheme(raw) {
        return Ok(Some(raw.to_string()));
    }
    Ok(Some(base.join(raw)?.to_string()))
}

/// True if `s` starts with an `http` or `https` scheme.
pub fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Collapse every run of whitespace into a single space and trim the ends.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(collapse_whitespace("  12\n  fev   2026 "), "12 fev 2026");
/// ```
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://site.tld/p").unwrap()
    }

    #[test]
    fn test_to_absolute_none_and_empty() {
        assert_eq!(to_absolute(None, &base()).unwrap(), None);
        assert_eq!(to_absolute(Some(""), &base()).unwrap(), None);
        assert_eq!(to_absolute(Some("   "), &base()).unwrap(), None);
    }

    #[test]
    fn test_to_absolute_keeps_absolute_urls() {
        assert_eq!(
            to_absolute(Some("http://x/y"), &base()).unwrap(),
            Some("http://x/y".to_string())
        );
        assert_eq!(
            to_absolute(Some("HTTPS://Other.tld/Z"), &base()).unwrap(),
            Some("HTTPS://Other.tld/Z".to_string())
        );
    }

    #[test]
    fn test_to_absolute_resolves_relative() {
        assert_eq!(
            to_absolute(Some("/a/b"), &base()).unwrap(),
            Some("https://site.tld/a/b".to_string())
        );
        assert_eq!(
            to_absolute(Some("noticias/1"), &base()).unwrap(),
            Some("https://site.tld/noticias/1".to_string())
        );
        assert_eq!(
            to_absolute(Some("//cdn.site.tld/img.jpg"), &base()).unwrap(),
            Some("https://cdn.site.tld/img.jpg".to_string())
        );
    }

    #[test]
    fn test_to_absolute_propagates_join_errors() {
        let err = to_absolute(Some("//[bad"), &base()).unwrap_err();
        assert_eq!(err, url::ParseError::InvalidIpv6Address);
    }

    #[test]
    fn test_has_http_scheme() {
        assert!(has_http_scheme("http://a"));
        assert!(has_http_scheme("https://a"));
        assert!(!has_http_scheme("httpfoo/bar"));
        assert!(!has_http_scheme("/http://a"));
        assert!(!has_http_scheme("ftp://a"));
        assert!(!has_http_scheme("ht"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  12\n\t fev   2026 "), "12 fev 2026");
        assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b"), "a b");
        assert_eq!(collapse_whitespace(" \n "), "");
        assert_eq!(collapse_whitespace("single"), "single");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("data").join("feeds");
        ensure_writable_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert!(!nested.join("..__probe_write__").exists());
    }
}
