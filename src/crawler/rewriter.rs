//! Link rewriting for offline mirrors
//!
//! Before a page is written to the mirror, site-absolute references (`/path`) on
//! anchors, stylesheet links, scripts and images are turned into relative ones so the
//! saved tree can be opened straight from disk.
//!
//! The rewrite policy is a plain function passed in by the caller. The default policy,
//! [`strip_leading_slash`], does not look at how deep the current page sits in the
//! mirror: `/css/site.css` becomes `css/site.css` on every page. Links therefore only
//! resolve when the mirror is browsed with the same path layout as the original site,
//! which is the case for pages at the site root.

use scraper::{Html, Node, Selector};

/// Element/attribute pairs whose values are rewritten
pub const REWRITE_TARGETS: &[(&str, &str)] = &[
    ("a", "href"),
    ("link", "href"),
    ("script", "src"),
    ("img", "src"),
];

/// Default rewrite policy: drop the leading `/` of a site-absolute path
///
/// Already relative values, absolute `http(s)://` URLs and scheme-relative
/// `//host/...` references are left alone, which also makes the policy idempotent.
/// The older rule stripped one slash from `//host/...` as well; that is not kept here.
///
/// # Examples
///
/// ```
/// use site_mirror::crawler::strip_leading_slash;
///
/// assert_eq!(strip_leading_slash("/cipai/1.html"), Some("cipai/1.html".to_string()));
/// assert_eq!(strip_leading_slash("other.html"), None);
/// assert_eq!(strip_leading_slash("https://external.com/x"), None);
/// ```
pub fn strip_leading_slash(value: &str) -> Option<String> {
    if value.starts_with("//") {
        return None;
    }
    value.strip_prefix('/').map(str::to_string)
}

/// Applies `rule` to every rewritable attribute in the document
///
/// `rule` returns `Some(new_value)` to replace an attribute value or `None` to keep
/// it. Returns the number of attributes that were replaced.
pub fn rewrite_links<F>(document: &mut Html, rule: F) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    let mut rewritten = 0;

    for (tag, attr) in REWRITE_TARGETS {
        let Ok(selector) = Selector::parse(&format!("{}[{}]", tag, attr)) else {
            continue;
        };

        let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();

        for id in ids {
            let Some(mut node) = document.tree.get_mut(id) else {
                continue;
            };
            let Node::Element(element) = node.value() else {
                continue;
            };

            for (name, value) in element.attrs.iter_mut() {
                if &*name.local != *attr {
                    continue;
                }

                let current: &str = &**value;
                if let Some(new_value) = rule(current) {
                    tracing::debug!("Fixed {} {}: {} -> {}", tag, attr, current, new_value);
                    *value = new_value.into();
                    rewritten += 1;
                }
            }
        }
    }

    rewritten
}

/// Parses `html`, rewrites its links with `rule` and serializes it again
pub fn rewrite_html<F>(html: &str, rule: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut document = Html::parse_document(html);
    let rewritten = rewrite_links(&mut document, rule);
    tracing::debug!("Rewrote {} links", rewritten);
    document.html()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(html: &str) -> String {
        rewrite_html(html, strip_leading_slash)
    }

    #[test]
    fn test_site_absolute_anchor_rewritten() {
        let out = rewrite(r#"<html><body><a href="/cipai/1.html">1</a></body></html>"#);
        assert!(out.contains(r#"<a href="cipai/1.html">"#), "{}", out);
    }

    #[test]
    fn test_relative_anchor_untouched() {
        let out = rewrite(r#"<html><body><a href="other.html">o</a></body></html>"#);
        assert!(out.contains(r#"<a href="other.html">"#), "{}", out);
    }

    #[test]
    fn test_external_anchor_untouched() {
        let out = rewrite(r#"<html><body><a href="https://external.com/x">x</a></body></html>"#);
        assert!(out.contains(r#"<a href="https://external.com/x">"#), "{}", out);
    }

    #[test]
    fn test_all_targets_rewritten() {
        let html = r#"<html><head>
            <link rel="stylesheet" href="/css/site.css">
            <script src="/js/app.js"></script>
            </head><body>
            <img src="/img/logo.png">
            <a href="/about.html">About</a>
            </body></html>"#;

        let mut document = Html::parse_document(html);
        assert_eq!(rewrite_links(&mut document, strip_leading_slash), 4);

        let out = document.html();
        assert!(out.contains(r#"href="css/site.css""#), "{}", out);
        assert!(out.contains(r#"src="js/app.js""#), "{}", out);
        assert!(out.contains(r#"src="img/logo.png""#), "{}", out);
        assert!(out.contains(r#"href="about.html""#), "{}", out);
    }

    #[test]
    fn test_other_attributes_untouched() {
        let html = r#"<html><body><a href="/a" data-src="/keep">a</a><div src="/div">d</div></body></html>"#;
        let out = rewrite(html);
        assert!(out.contains(r#"data-src="/keep""#), "{}", out);
        assert!(out.contains(r#"src="/div""#), "{}", out);
        assert!(out.contains(r#"href="a""#), "{}", out);
    }

    #[test]
    fn test_attribute_order_preserved() {
        let out = rewrite(r#"<html><body><a class="nav" href="/x" id="y">x</a></body></html>"#);
        assert!(out.contains(r#"<a class="nav" href="x" id="y">"#), "{}", out);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let html = r#"<html><head><script src="//cdn.example.com/lib.js"></script></head><body><a href="/a/b.html">b</a><img src="/i.png"></body></html>"#;
        let once = rewrite(html);
        let twice = rewrite(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_custom_rule() {
        let html = r#"<html><body><a href="/a">a</a><img src="/b.png"></body></html>"#;
        let mut document = Html::parse_document(html);

        let count = rewrite_links(&mut document, |value| {
            value.strip_prefix('/').map(|rest| format!("../{}", rest))
        });

        assert_eq!(count, 2);
        let out = document.html();
        assert!(out.contains(r#"href="../a""#), "{}", out);
        assert!(out.contains(r#"src="../b.png""#), "{}", out);
    }

    #[test]
    fn test_strip_leading_slash() {
        assert_eq!(strip_leading_slash("/x"), Some("x".to_string()));
        assert_eq!(strip_leading_slash("/"), Some(String::new()));
        assert_eq!(strip_leading_slash("//cdn.example.com/x"), None);
        assert_eq!(strip_leading_slash("x/y"), None);
        assert_eq!(strip_leading_slash("http://example.com/x"), None);
    }
}
