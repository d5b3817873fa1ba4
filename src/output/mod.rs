//! Output module for writing the mirror and reporting on it
//!
//! This module handles:
//! - Mapping URLs onto file paths under the output directory
//! - Choosing file extensions from Content-Type values
//! - Recording crawl statistics

mod mime;
mod mirror;
pub mod stats;

pub use mime::{extension_for_mime, DEFAULT_EXTENSION};
pub use mirror::{mirror_path, MirrorWriter, INDEX_FILE};
pub use stats::{print_statistics, CrawlStats};
