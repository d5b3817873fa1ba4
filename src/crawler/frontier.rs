//! Frontier for managing the queue of URLs to mirror
//!
//! URLs are handed out strictly in insertion order. Every URL ever accepted stays in
//! the seen-set for the life of the process, so a page that links back to one already
//! dequeued cannot put it back in line; that is what keeps cyclic link graphs finite.

use crate::url::{is_valid_url, normalize_url};
use std::collections::{HashSet, VecDeque};

/// FIFO queue of pending URLs plus the set of URLs ever enqueued
///
/// Intended for use from a single control thread; there is no internal locking.
#[derive(Debug, Default)]
pub struct Frontier {
    /// Pending URLs, normalized, oldest first
    queue: VecDeque<String>,

    /// Normalized URLs ever enqueued this process
    seen: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a URL unless it is invalid or was queued before
    ///
    /// The normalized form is what gets queued. Returns true if the URL was added.
    pub fn add_url(&mut self, url: &str) -> bool {
        if !is_valid_url(url) {
            tracing::warn!("Invalid URL skipped: {}", url);
            return false;
        }

        let normalized = normalize_url(url);
        if self.seen.contains(&normalized) {
            return false;
        }

        tracing::trace!("Queued {}", normalized);
        self.seen.insert(normalized.clone());
        self.queue.push_back(normalized);
        true
    }

    /// Removes and returns the oldest queued URL
    pub fn next_url(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Returns true while URLs remain queued
    pub fn has_more_urls(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Number of URLs currently queued
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct URLs ever queued
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
