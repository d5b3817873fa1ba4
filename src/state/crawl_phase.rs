/// Crawl phase definitions for tracking a mirroring run
///
/// A run moves through these phases exactly once, in order. The coordinator checks
/// every transition so a misuse (for example draining twice) is reported instead of
/// silently re-running against a released renderer.
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Coordinator constructed, nothing queued from the seed yet
    Idle,

    /// The seed URL is being checked against the ledger and queued
    Seeding,

    /// URLs are being dequeued, fetched and mirrored
    Draining,

    /// The frontier is empty (or draining aborted) and the renderer was released
    Closed,
}

impl CrawlPhase {
    /// Returns true if moving from `self` to `next` is a legal transition
    ///
    /// `Idle -> Closed` is allowed so a coordinator that never ran can still be closed.
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Seeding)
                | (Self::Seeding, Self::Draining)
                | (Self::Draining, Self::Closed)
                | (Self::Idle, Self::Closed)
        )
    }

    /// Short lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Seeding => "seeding",
            Self::Draining => "draining",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
