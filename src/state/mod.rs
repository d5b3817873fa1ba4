//! State module for tracking crawl progress
//!
//! Per-URL progress lives in the ledger (visited or not); this module only models the
//! phase of the run as a whole.

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
