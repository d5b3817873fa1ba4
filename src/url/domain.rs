use url::Url;

/// Extracts the host from a URL string
///
/// The host is reported the way the URL parser canonicalizes it (lowercase for
/// `http`/`https`), without the port. Any parse failure, or a URL without a host,
/// yields an empty string.
///
/// # Examples
///
/// ```
/// use site_mirror::url::extract_domain;
///
/// assert_eq!(extract_domain("https://example.com/path"), "example.com");
/// assert_eq!(extract_domain("https://example.com:8080/"), "example.com");
/// assert_eq!(extract_domain("not a url"), "");
/// ```
pub fn extract_domain(url_str: &str) -> String {
    Url::parse(url_str)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Returns true if both URLs parse and share the same host
///
/// Two unparseable inputs are not considered the same domain.
pub fn is_same_domain(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a.host_str() == b.host_str(),
        _ => false,
    }
}

/// Returns true if the URL does not start with `http://` or `https://`
///
/// Scheme-relative references such as `//cdn.example.com/x.js` count as relative
/// under this rule, and so do other schemes like `mailto:`.
pub fn is_relative_url(url_str: &str) -> bool {
    !url_str.starts_with("http://") && !url_str.starts_with("https://")
}
