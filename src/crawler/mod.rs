//! Crawler module for mirroring pages
//!
//! This module contains the core crawling logic, including:
//! - The frontier of URLs waiting to be fetched
//! - Page fetching through a pluggable renderer
//! - HTML parsing and link extraction
//! - Link rewriting for offline browsing
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod rewriter;

pub use coordinator::Coordinator;
pub use fetcher::{
    build_http_client, is_html_content_type, HttpRenderer, RenderedPage, Renderer,
    UNKNOWN_CONTENT_TYPE,
};
pub use frontier::Frontier;
pub use parser::{parse_html, PageRecord};
pub use rewriter::{rewrite_html, rewrite_links, strip_leading_slash, REWRITE_TARGETS};

use crate::config::Config;
use crate::output::CrawlStats;
use crate::MirrorError;

/// Mirrors a site over HTTP using the given configuration
///
/// This is the main entry point for a crawl. It builds an [`HttpRenderer`] from the
/// configuration, resumes any pending URLs from the ledger, seeds the frontier with
/// `seed` and drains it.
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::Config;
/// use site_mirror::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = crawl(&Config::default(), "https://example.com/").await?;
/// println!("{}", stats);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, seed: &str) -> Result<CrawlStats, MirrorError> {
    let renderer = HttpRenderer::from_config(config);
    let mut coordinator = Coordinator::new(config, renderer)?;
    coordinator.crawl(seed).await
}
