use url::Url;

/// Normalizes a URL string into the key used for deduplication
///
/// # Normalization Steps
///
/// 1. Empty input is returned unchanged
/// 2. Remove every trailing `/`; input made only of slashes becomes empty
/// 3. Prepend `http://` unless the result already starts with `http://` or `https://`
///
/// Host case, default ports, query order and dot segments are left alone. Unlike the
/// older rule, slash-only input gives `""` rather than `http://`, which keeps the function
/// idempotent.
///
/// # Examples
///
/// ```
/// use site_mirror::url::normalize_url;
///
/// assert_eq!(normalize_url("https://example.com/page/"), "https://example.com/page");
/// assert_eq!(normalize_url("example.com"), "http://example.com");
/// assert_eq!(normalize_url(""), "");
/// ```
pub fn normalize_url(url_str: &str) -> String {
    if url_str.is_empty() {
        return String::new();
    }

    let stripped = url_str.trim_end_matches('/');
    if stripped.is_empty() {
        return String::new();
    }

    if stripped.starts_with("http://") || stripped.starts_with("https://") {
        stripped.to_string()
    } else {
        format!("http://{}", stripped)
    }
}

/// Returns true if the string parses as an absolute URL with any scheme
///
/// # Examples
///
/// ```
/// use site_mirror::url::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/"));
/// assert!(is_valid_url("mailto:someone@example.com"));
/// assert!(!is_valid_url("/relative/path"));
/// ```
pub fn is_valid_url(url_str: &str) -> bool {
    Url::parse(url_str).is_ok()
}
