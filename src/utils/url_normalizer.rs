//! Long-URL validation and normalization.
//!
//! Every stored target passes through [`normalize_url`] so equal URLs have
//! one canonical spelling and dangerous schemes never enter the registry.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Validates `input` as an absolute http(s) URL and returns its canonical
/// form.
///
/// # Normalization Rules
///
/// 1. Only HTTP and HTTPS schemes are accepted (`javascript:`, `data:`,
///    `file:` and friends are rejected)
/// 2. Hostname is lowercased
/// 3. Default ports are dropped (80 for HTTP, 443 for HTTPS)
/// 4. The fragment is removed
/// 5. Path and query are preserved as-is
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] for malformed input or an unsupported
/// scheme.
pub fn normalize_url(input: &str) -> Result<String, AppError> {
    let mut url = Url::parse(input).map_err(|e| {
        AppError::invalid_url(
            "Invalid URL format",
            json!({ "url": input, "reason": e.to_string() }),
        )
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::invalid_url(
            "Only HTTP and HTTPS URLs can be shortened",
            json!({ "url": input, "scheme": url.scheme() }),
        ));
    }

    if let Some(host) = url.host_str() {
        let lowered = host.to_ascii_lowercase();
        if lowered != host {
            url.set_host(Some(&lowered)).map_err(|e| {
                AppError::invalid_url(
                    "Invalid URL host",
                    json!({ "url": input, "reason": e.to_string() }),
                )
            })?;
        }
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        // Infallible for http/https per the url crate contract.
        let _ = url.set_port(None);
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_https() {
        assert_eq!(
            normalize_url("https://example.com").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_host_is_lowercased() {
        assert_eq!(
            normalize_url("https://EXAMPLE.COM/Path").unwrap(),
            "https://example.com/Path"
        );
    }

    #[test]
    fn test_default_port_removed() {
        assert_eq!(
            normalize_url("https://example.com:443/path").unwrap(),
            "https://example.com/path"
        );
        assert_eq!(
            normalize_url("http://example.com:80/path").unwrap(),
            "http://example.com/path"
        );
    }

    #[test]
    fn test_custom_port_preserved() {
        assert_eq!(
            normalize_url("http://localhost:3000/test").unwrap(),
            "http://localhost:3000/test"
        );
    }

    #[test]
    fn test_fragment_removed_query_preserved() {
        assert_eq!(
            normalize_url("https://example.com/page?key=value#section").unwrap(),
            "https://example.com/page?key=value"
        );
    }

    #[test]
    fn test_not_a_url() {
        let err = normalize_url("not a valid url").unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl { .. }));
    }

    #[test]
    fn test_relative_url_rejected() {
        assert!(normalize_url("example.com/path").is_err());
    }

    #[test]
    fn test_empty_string_rejected() {
        assert!(normalize_url("").is_err());
    }

    #[test]
    fn test_dangerous_schemes_rejected() {
        for input in [
            "javascript:alert('xss')",
            "data:text/plain,hello",
            "file:///etc/passwd",
            "ftp://example.com/file.txt",
            "mailto:test@example.com",
        ] {
            let err = normalize_url(input).unwrap_err();
            assert!(matches!(err, AppError::InvalidUrl { .. }), "{input}");
        }
    }

    #[test]
    fn test_long_url_accepted() {
        let url = format!("https://example.com/{}", "a".repeat(2000));
        assert!(normalize_url(&url).is_ok());
    }
}
