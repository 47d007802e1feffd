//! Target URL normalization.
//!
//! # Responsibilities
//! - Turn the raw inbound path into a fully-qualified target URL
//! - Preserve targets that already carry a scheme
//! - Surface parse failures instead of defaulting

use url::Url;

/// Normalize a raw target into a parsed URL.
///
/// A target already starting with `http://` or `https://` is used
/// unchanged; anything else gets `https://` prepended.
pub fn normalize(raw: &str) -> Result<Url, url::ParseError> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("https://{}", raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_preserved() {
        let url = normalize("https://i.ytimg.com/x").unwrap();
        assert_eq!(url.as_str(), "https://i.ytimg.com/x");

        let url = normalize("http://youtube.com/watch").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_scheme_prepended() {
        let url = normalize("i.ytimg.com/x").unwrap();
        assert_eq!(url.as_str(), "https://i.ytimg.com/x");
    }

    #[test]
    fn test_query_preserved() {
        let url = normalize("www.youtube.com/watch?v=abc123").unwrap();
        assert_eq!(url.host_str(), Some("www.youtube.com"));
        assert_eq!(url.path(), "/watch");
        assert_eq!(url.query(), Some("v=abc123"));
    }

    #[test]
    fn test_host_lowercased_by_parser() {
        let url = normalize("WWW.YOUTUBE.COM/feed").unwrap();
        assert_eq!(url.host_str(), Some("www.youtube.com"));
    }

    #[test]
    fn test_port_preserved() {
        let url = normalize("http://127.0.0.1:8080/data").unwrap();
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn test_malformed_target_is_an_error() {
        assert!(normalize("").is_err());
        assert!(normalize("https://").is_err());
    }
}
