//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped in query-string components; RFC 3986 unreserved
/// characters stay raw
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a site-relative URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "blog/my-post/") // -> "/blog/my-post/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the site origin
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "blog/my-post") // -> "https://example.com/blog/my-post"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Percent-encode a single query-string component
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, QUERY_COMPONENT).to_string()
}

/// Build a query string from key/value pairs, in the given order
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            root: "/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "blog/my-post"), "/blog/my-post");
        assert_eq!(url_for(&config, "/blog/"), "/blog/");
        assert_eq!(url_for(&config, ""), "/");
    }

    #[test]
    fn test_url_for_with_subpath_root() {
        let mut config = test_config();
        config.root = "/site/".to_string();
        assert_eq!(url_for(&config, "blog/"), "/site/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "blog/my-post"),
            "https://example.com/blog/my-post"
        );
    }

    #[test]
    fn test_query_string_encoding() {
        let q = query_string(&[
            ("date", "2024-01-01"),
            ("title", "Hello World"),
            ("slug", "my-post"),
        ]);
        assert_eq!(q, "date=2024-01-01&title=Hello%20World&slug=my-post");
    }
}
