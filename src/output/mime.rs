//! MIME type to file extension mapping for mirrored non-HTML resources

/// Extension used when a MIME type is not in the table
pub const DEFAULT_EXTENSION: &str = "txt";

const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("text/html", "html"),
    ("text/css", "css"),
    ("application/javascript", "js"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/svg+xml", "svg"),
    ("application/json", "json"),
    ("text/xml", "xml"),
    ("application/pdf", "pdf"),
];

/// Returns the file extension for a Content-Type value
///
/// Parameters such as `; charset=utf-8` are ignored and the comparison is
/// case-insensitive. Unknown types map to `txt`.
///
/// # Examples
///
/// ```
/// use site_mirror::output::extension_for_mime;
///
/// assert_eq!(extension_for_mime("image/png"), "png");
/// assert_eq!(extension_for_mime("text/css; charset=utf-8"), "css");
/// assert_eq!(extension_for_mime("application/x-unknown"), "txt");
/// ```
pub fn extension_for_mime(content_type: &str) -> &'static str {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    MIME_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == essence)
        .map(|(_, ext)| *ext)
        .unwrap_or(DEFAULT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types() {
        assert_eq!(extension_for_mime("text/html"), "html");
        assert_eq!(extension_for_mime("text/css"), "css");
        assert_eq!(extension_for_mime("application/javascript"), "js");
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
        assert_eq!(extension_for_mime("image/svg+xml"), "svg");
        assert_eq!(extension_for_mime("application/pdf"), "pdf");
    }

    #[test]
    fn test_parameters_and_case_ignored() {
        assert_eq!(extension_for_mime("Application/JSON; charset=UTF-8"), "json");
        assert_eq!(extension_for_mime(" image/gif ;q=1"), "gif");
    }

    #[test]
    fn test_unknown_defaults_to_txt() {
        assert_eq!(extension_for_mime("unknown"), "txt");
        assert_eq!(extension_for_mime(""), "txt");
        assert_eq!(extension_for_mime("font/woff2"), "txt");
    }
}
