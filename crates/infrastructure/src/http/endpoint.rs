//! Endpoint URL construction.

use url::Url;

/// Joins a base URL and a catalogue path.
///
/// Trailing slashes on the base are dropped so `http://host/` and
/// `http://host` produce the same URL. The path keeps its query string.
///
/// # Errors
///
/// Returns the parse error message if the result is not a valid absolute URL.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, String> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| format!("{e}: {joined}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_base_and_path() {
        let url = endpoint_url("http://localhost:3000", "/api/config").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/config");
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let url = endpoint_url("https://api.example.com/", "/api/search?q=test").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/search?q=test");
        assert_eq!(url.query(), Some("q=test"));
    }

    #[test]
    fn base_prefix_is_preserved() {
        let url = endpoint_url("http://host/omnichat", "/api/models").unwrap();
        assert_eq!(url.path(), "/omnichat/api/models");
    }

    #[test]
    fn rejects_relative_base() {
        let err = endpoint_url("localhost", "/api/config").unwrap_err();
        assert!(err.contains("localhost/api/config"));
    }
}
