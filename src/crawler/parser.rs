//! HTML parser for extracting page metadata and links
//!
//! This module handles parsing fetched HTML to extract:
//! - The page title
//! - A word count of the body text
//! - Every `<a href>` target, absolutized against the page URL where possible
//!
//! Extraction never fails: the HTML parser is error tolerant, and a link that cannot
//! be resolved is passed through as written rather than dropped.

use crate::url::is_relative_url;
use scraper::{Html, Selector};
use url::Url;

/// Information extracted from one HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRecord {
    /// Trimmed text of the first `<title>`, empty if there is none
    pub title: String,

    /// Number of whitespace-delimited tokens in the body text
    pub word_count: usize,

    /// Link targets in document order
    pub links: Vec<String>,
}

/// Parses HTML content and extracts title, word count and links
///
/// # Link Extraction Rules
///
/// - Every `href` on an `<a>` element is collected, in document order
/// - With a base URL, relative hrefs (anything not starting with `http://` or
///   `https://`) are resolved against it
/// - If the base does not parse, or resolution fails, the href is kept verbatim
///
/// # Example
///
/// ```
/// use site_mirror::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let page = parse_html(html, Some("https://example.com/"));
/// assert_eq!(page.title, "Test");
/// assert_eq!(page.word_count, 1);
/// assert_eq!(page.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: Option<&str>) -> PageRecord {
    if html.trim().is_empty() {
        return PageRecord::default();
    }

    let document = Html::parse_document(html);
    let base = base_url.and_then(|base| Url::parse(base).ok());

    let body_text = extract_body_text(&document);
    let word_count = body_text.split_whitespace().count();

    PageRecord {
        title: extract_title(&document),
        word_count,
        links: extract_links(&document, base.as_ref()),
    }
}

/// Extracts the trimmed text of the first `<title>` element
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts the body text with every whitespace run collapsed to one space
fn extract_body_text(document: &Html) -> String {
    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };

    document
        .select(&body_selector)
        .next()
        .map(|body| {
            body.text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Collects every anchor href, resolving relative ones when a base was given
fn extract_links(document: &Html, base: Option<&Url>) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| match base {
            Some(base) if is_relative_url(href) => resolve_link(href, base),
            _ => href.to_string(),
        })
        .collect()
}

/// Resolves a relative href against the base, falling back to the raw href
fn resolve_link(href: &str, base: &Url) -> String {
    match base.join(href) {
        Ok(absolute_url) => absolute_url.to_string(),
        Err(_) => {
            tracing::debug!("Could not resolve link {}, keeping it as written", href);
            href.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/dir/page.html";

    #[test]
    fn test_empty_html() {
        let page = parse_html("", Some(BASE));
        assert_eq!(page, PageRecord::default());
        assert_eq!(page.title, "");
        assert_eq!(page.word_count, 0);
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_extract_title_with_whitespace() {
        let html = r#"<html><head><title>  Test Page  </title></head><body></body></html>"#;
        let page = parse_html(html, Some(BASE));
        assert_eq!(page.title, "Test Page");
    }

    #[test]
    fn test_first_title_wins() {
        let html = r#"<html><head><title>One</title><title>Two</title></head></html>"#;
        assert_eq!(parse_html(html, None).title, "One");
    }

    #[test]
    fn test_no_title() {
        let html = r#"<html><head></head><body>words here</body></html>"#;
        assert_eq!(parse_html(html, None).title, "");
    }

    #[test]
    fn test_word_count_collapses_whitespace() {
        let html = "<html><body><p>one   two</p>\n\n<div>three\tfour</div> <span>five</span></body></html>";
        assert_eq!(parse_html(html, None).word_count, 5);
    }

    #[test]
    fn test_word_count_empty_body() {
        let html = "<html><head><title>Only a title</title></head><body>   </body></html>";
        assert_eq!(parse_html(html, None).word_count, 0);
    }

    #[test]
    fn test_absolute_link_kept() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let page = parse_html(html, Some(BASE));
        assert_eq!(page.links, vec!["https://other.com/page".to_string()]);
    }

    #[test]
    fn test_site_absolute_link_resolved() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let page = parse_html(html, Some(BASE));
        assert_eq!(page.links, vec!["https://example.com/other".to_string()]);
    }

    #[test]
    fn test_relative_path_link_resolved() {
        let html = r#"<html><body><a href="sibling.html">Link</a><a href="../up.html">Up</a></body></html>"#;
        let page = parse_html(html, Some(BASE));
        assert_eq!(
            page.links,
            vec![
                "https://example.com/dir/sibling.html".to_string(),
                "https://example.com/up.html".to_string(),
            ]
        );
    }

    #[test]
    fn test_relative_link_without_base_kept() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let page = parse_html(html, None);
        assert_eq!(page.links, vec!["/other".to_string()]);
    }

    #[test]
    fn test_unresolvable_link_kept_verbatim() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let page = parse_html(html, Some("not a base url"));
        assert_eq!(page.links, vec!["/other".to_string()]);
    }

    #[test]
    fn test_links_in_document_order_without_dedup() {
        let html = r#"
            <html>
            <body>
                <a href="/page2">2</a>
                <a href="/page1">1</a>
                <a href="/page2">2 again</a>
                <a name="anchor-without-href">x</a>
            </body>
            </html>
        "#;
        let page = parse_html(html, Some(BASE));
        assert_eq!(
            page.links,
            vec![
                "https://example.com/page2".to_string(),
                "https://example.com/page1".to_string(),
                "https://example.com/page2".to_string(),
            ]
        );
    }

    #[test]
    fn test_malformed_html_degrades() {
        let html = "<html><head><title>Broken<body><a href='/x'>unclosed";
        let page = parse_html(html, Some(BASE));
        assert!(page.title.starts_with("Broken"));
    }
}
