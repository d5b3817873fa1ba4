//! URL handling module for Site-Mirror
//!
//! This module provides the dedup-key normalization used by the frontier and the
//! ledger, plus the small set of predicates the crawl loop uses to decide which
//! discovered links belong to the mirrored site.
//!
//! Normalization here is intentionally narrow: it only strips trailing slashes and
//! supplies a default `http://` scheme. Ledger files written by earlier runs are keyed
//! by exactly this rule, so it must not grow into full RFC 3986 normalization.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, is_relative_url, is_same_domain};
pub use normalize::{is_valid_url, normalize_url};
