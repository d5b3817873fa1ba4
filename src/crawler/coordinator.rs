//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Resuming discovered-but-unvisited URLs from the ledger
//! - Seeding the frontier
//! - Fetching, extracting, rewriting and saving each URL in turn
//! - Recording progress in the ledger as it goes
//!
//! A run moves through the phases of [`CrawlPhase`]. The renderer session is opened at
//! the start of draining and released on every way out of it.

use crate::config::Config;
use crate::crawler::fetcher::{is_html_content_type, Renderer};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_html;
use crate::crawler::rewriter::{rewrite_html, strip_leading_slash};
use crate::ledger::Ledger;
use crate::output::{extension_for_mime, CrawlStats, MirrorWriter};
use crate::state::CrawlPhase;
use crate::url::{is_relative_url, is_same_domain, is_valid_url, normalize_url};
use crate::MirrorError;
use std::path::Path;
use std::time::Duration;

/// Main crawler coordinator structure
///
/// Owns the frontier, the ledger and the renderer; nothing is shared across tasks.
pub struct Coordinator<R: Renderer> {
    frontier: Frontier,
    ledger: Ledger,
    writer: MirrorWriter,
    renderer: R,
    phase: CrawlPhase,
    request_delay: Duration,
    max_depth: u32,
    stats: CrawlStats,
}

impl<R: Renderer> Coordinator<R> {
    /// Creates a new coordinator instance
    ///
    /// Creates the output directory, opens the ledger and queues every URL that a
    /// previous run discovered but never visited.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(MirrorError::OutputDir)` - The output directory could not be created
    pub fn new(config: &Config, renderer: R) -> Result<Self, MirrorError> {
        let output_dir = config.output_dir();
        std::fs::create_dir_all(output_dir).map_err(|source| MirrorError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let ledger = Ledger::open(config.links_file_path(), config.parsed_links_file_path());
        tracing::info!(
            "Ledger opened: {} visited, {} discovered",
            ledger.visited_count(),
            ledger.discovered_count()
        );

        let mut frontier = Frontier::new();
        let pending = ledger.pending_discovered();
        if !pending.is_empty() {
            tracing::info!("Resuming {} discovered URLs from previous runs", pending.len());
        }
        for url in &pending {
            frontier.add_url(url);
        }

        Ok(Self {
            frontier,
            ledger,
            writer: MirrorWriter::new(output_dir),
            renderer,
            phase: CrawlPhase::Idle,
            request_delay: config.crawler.request_delay(),
            max_depth: config.crawler.max_depth,
            stats: CrawlStats::default(),
        })
    }

    /// Runs seeding, draining and closing for `seed`
    ///
    /// An empty seed only drains what was resumed from the ledger. Per-URL failures are
    /// counted and recorded as visited, not returned; an error here means the run itself could not proceed
    /// (for example the renderer could not be acquired).
    pub async fn crawl(&mut self, seed: &str) -> Result<CrawlStats, MirrorError> {
        tracing::info!("Starting crawl (requested depth: {})", self.max_depth);

        self.transition(CrawlPhase::Seeding)?;
        self.seed(seed);

        self.transition(CrawlPhase::Draining)?;
        let drained = self.drain().await;

        if let Err(e) = self.renderer.release().await {
            tracing::error!("Failed to release renderer: {}", e);
        }
        self.transition(CrawlPhase::Closed)?;

        drained?;
        self.stats.log_summary();
        tracing::info!(
            "Ledger totals: {} visited, {} discovered",
            self.ledger.visited_count(),
            self.ledger.discovered_count()
        );
        Ok(self.stats)
    }

    fn seed(&mut self, seed: &str) {
        if seed.is_empty() {
            return;
        }

        if self.ledger.is_visited(seed) {
            tracing::info!("Seed already visited: {}", seed);
        } else if self.frontier.add_url(seed) {
            tracing::info!("Seeded frontier with {}", seed);
        }
    }

    async fn drain(&mut self) -> Result<(), MirrorError> {
        self.renderer.acquire().await?;

        while let Some(url) = self.frontier.next_url() {
            if self.ledger.is_visited(&url) {
                tracing::debug!("Skipping already visited URL: {}", url);
                self.stats.skipped_visited += 1;
                continue;
            }

            match self.process_url(&url).await {
                Ok(()) => {
                    self.stats.processed += 1;
                    if !self.request_delay.is_zero() {
                        tokio::time::sleep(self.request_delay).await;
                    }
                }
                Err(e) => {
                    tracing::error!("Error processing {}: {}", url, e);
                    self.stats.failed += 1;
                    // Recorded so later runs do not retry dead links
                    self.ledger.mark_visited(&url);
                }
            }
        }

        tracing::info!("Frontier is empty, crawl complete");
        Ok(())
    }

    /// Fetches, saves and records one URL, then queues its links
    async fn process_url(&mut self, url: &str) -> Result<(), MirrorError> {
        tracing::info!("Processing: {}", url);

        let probed = match self.renderer.fetch_content_type(url).await {
            Ok(content_type) => Some(content_type),
            Err(e) => {
                tracing::warn!("Content type probe failed for {}: {}", url, e);
                None
            }
        };

        let page = self.renderer.fetch(url).await?;
        if normalize_url(&page.final_url) != url {
            tracing::info!("Redirected: {} -> {}", url, page.final_url);
        }
        let content_type = probed.unwrap_or_else(|| page.content_type.clone());

        let links = if is_html_content_type(&content_type) {
            let html = page.text();
            let record = parse_html(&html, Some(url));
            tracing::info!(
                "Title: {} | Words: {} | Links: {}",
                record.title,
                record.word_count,
                record.links.len()
            );

            let rewritten = rewrite_html(&html, strip_leading_slash);
            self.writer.write(url, Some("html"), rewritten.as_bytes()).await?;
            record.links
        } else {
            let extension = extension_for_mime(&content_type);
            self.writer.write(url, Some(extension), &page.body).await?;
            Vec::new()
        };

        self.ledger.mark_visited(url);
        self.enqueue_links(url, &links);
        Ok(())
    }

    fn enqueue_links(&mut self, page_url: &str, links: &[String]) {
        for link in links {
            if !is_valid_url(link) {
                tracing::debug!("Skipping invalid link: {}", link);
                continue;
            }
            if !is_same_domain(link, page_url) && !is_relative_url(link) {
                tracing::debug!("Skipping external link: {}", link);
                continue;
            }
            if self.ledger.is_visited(link) {
                continue;
            }

            if self.frontier.add_url(link) {
                self.stats.links_enqueued += 1;
            }
            self.ledger.mark_discovered(link);
        }
    }

    fn transition(&mut self, to: CrawlPhase) -> Result<(), MirrorError> {
        if !self.phase.can_transition_to(to) {
            return Err(MirrorError::InvalidTransition {
                from: self.phase,
                to,
            });
        }

        tracing::debug!("Crawl phase: {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    /// Current phase of the run
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// The URL queue
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// The visited/discovered ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Counters for the current run
    pub fn stats(&self) -> CrawlStats {
        self.stats
    }

    /// Root of the mirror on disk
    pub fn output_dir(&self) -> &Path {
        self.writer.root()
    }

    /// The renderer, for inspection after a run
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
