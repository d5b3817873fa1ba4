//! Run statistics for a mirror crawl
//!
//! Counters are updated by the coordinator as URLs are processed and reported once
//! the run ends.

use std::fmt;

/// Counters collected over one crawl run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// URLs fetched and saved
    pub processed: u64,

    /// Dequeued URLs skipped because they were already visited
    pub skipped_visited: u64,

    /// URLs whose processing failed
    pub failed: u64,

    /// Links newly added to the frontier
    pub links_enqueued: u64,
}

impl CrawlStats {
    /// Total URLs taken off the frontier
    pub fn dequeued(&self) -> u64 {
        self.processed + self.skipped_visited + self.failed
    }

    /// Share of attempted URLs that were saved, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.processed + self.failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.processed as f64 / attempted as f64) * 100.0
    }

    /// Emits the summary through tracing
    pub fn log_summary(&self) {
        tracing::info!(
            "Crawl finished: {} processed, {} skipped, {} failed, {} links enqueued",
            self.processed,
            self.skipped_visited,
            self.failed,
            self.links_enqueued
        );
    }
}

impl fmt::Display for CrawlStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Mirror Statistics ===")?;
        writeln!(f)?;
        writeln!(f, "  URLs dequeued: {}", self.dequeued())?;
        writeln!(f, "  Pages saved: {}", self.processed)?;
        writeln!(f, "  Already visited: {}", self.skipped_visited)?;
        writeln!(f, "  Failed: {}", self.failed)?;
        writeln!(f, "  Links enqueued: {}", self.links_enqueued)?;
        write!(f, "  Success rate: {:.1}%", self.success_rate())
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("{}", stats);
}
