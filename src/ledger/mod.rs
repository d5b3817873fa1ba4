//! Ledger module for persisting crawl progress across runs
//!
//! The ledger is two append-only logs:
//! - the visited log records every URL whose content was fetched and saved
//! - the discovered log records every link target ever queued
//!
//! Both are loaded once when the ledger is opened and only ever appended to
//! afterwards. On the next run, discovered URLs that never made it into the visited
//! log are handed back to the frontier so an interrupted crawl resumes.

mod append_log;

pub use append_log::AppendLog;

use std::path::{Path, PathBuf};

/// Default visited log file name inside the output directory
pub const VISITED_LOG_NAME: &str = "links.txt";

/// Default discovered log file name inside the output directory
pub const DISCOVERED_LOG_NAME: &str = "parsed_links.txt";

/// Durable memory of visited and discovered URLs
#[derive(Debug)]
pub struct Ledger {
    visited: AppendLog,
    discovered: AppendLog,
}

impl Ledger {
    /// Opens the ledger, loading both logs
    ///
    /// Missing or unreadable files load as empty; see [`AppendLog::load`].
    pub fn open(visited_path: impl Into<PathBuf>, discovered_path: impl Into<PathBuf>) -> Self {
        Self {
            visited: AppendLog::load(visited_path),
            discovered: AppendLog::load(discovered_path),
        }
    }

    /// Opens the ledger using the default file names inside `output_dir`
    pub fn open_in(output_dir: &Path) -> Self {
        Self::open(
            output_dir.join(VISITED_LOG_NAME),
            output_dir.join(DISCOVERED_LOG_NAME),
        )
    }

    /// Returns true if the URL was fetched and saved in this or a previous run
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns true if the URL was ever recorded as a discovered link
    pub fn is_discovered(&self, url: &str) -> bool {
        self.discovered.contains(url)
    }

    /// Records a URL as fetched and saved
    ///
    /// The original string is appended to the visited log. A failed append is logged
    /// and otherwise ignored: the in-memory set is still updated so the rest of this
    /// run treats the URL as done, only durability for later runs is lost.
    ///
    /// Returns false without writing if the URL was already recorded.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if !self.visited.insert(url) {
            return false;
        }

        match self.visited.append(url) {
            Ok(()) => tracing::debug!("Added URL to {}: {}", self.visited.path().display(), url),
            Err(e) => tracing::error!("Error writing visited URL {}: {}", url, e),
        }
        true
    }

    /// Records a URL as discovered, once per normalized form
    ///
    /// Returns false without writing if the URL was already recorded.
    pub fn mark_discovered(&mut self, url: &str) -> bool {
        if !self.discovered.insert(url) {
            return false;
        }

        match self.discovered.append(url) {
            Ok(()) => tracing::debug!(
                "Added URL to {}: {}",
                self.discovered.path().display(),
                url
            ),
            Err(e) => tracing::error!("Error writing discovered URL {}: {}", url, e),
        }
        true
    }

    /// Discovered URLs that were never visited, in the order they were recorded
    pub fn pending_discovered(&self) -> Vec<String> {
        self.discovered
            .iter()
            .filter(|url| !self.visited.contains(url))
            .map(str::to_string)
            .collect()
    }

    /// Number of distinct visited URLs
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of distinct discovered URLs
    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    /// Path of the visited log
    pub fn visited_path(&self) -> &Path {
        self.visited.path()
    }

    /// Path of the discovered log
    pub fn discovered_path(&self) -> &Path {
        self.discovered.path()
    }
}
