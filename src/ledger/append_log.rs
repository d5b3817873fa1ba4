//! A single append-only URL log
//!
//! The file holds one URL per line in the form it was recorded. The in-memory side
//! holds the normalized form of every line, so lookups are keyed the same way the
//! frontier dedups.

use crate::url::normalize_url;
use crate::MirrorError;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// One append-only log file and the normalized set loaded from it
#[derive(Debug)]
pub struct AppendLog {
    /// Path of the backing file
    path: PathBuf,

    /// Normalized URLs recorded so far (file contents plus this run)
    entries: HashSet<String>,

    /// Normalized URLs in first-seen order
    order: Vec<String>,
}

impl AppendLog {
    /// Loads a log from disk
    ///
    /// Invalid UTF-8 is decoded lossily, so a damaged line never hides the others.
    /// A missing file is an empty log. Any other read error is logged and also
    /// yields an empty log, so a damaged file never blocks a run from starting.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut log = Self {
            path,
            entries: HashSet::new(),
            order: Vec::new(),
        };

        match fs::read(&log.path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                for line in content.lines() {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    log.insert(line);
                }
                tracing::info!(
                    "Loaded {} existing URLs from {}",
                    log.len(),
                    log.path.display()
                );
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "No existing file found at {}, starting fresh",
                    log.path.display()
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Error loading existing URLs from {}: {}",
                    log.path.display(),
                    e
                );
            }
        }

        log
    }

    /// Returns true if the normalized form of `url` is recorded
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains(&normalize_url(url))
    }

    /// Records the normalized form of `url` in memory only
    ///
    /// Returns false if it was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        let normalized = normalize_url(url);
        if self.entries.contains(&normalized) {
            return false;
        }
        self.entries.insert(normalized.clone());
        self.order.push(normalized);
        true
    }

    /// Appends `url` verbatim plus a newline to the backing file
    pub fn append(&self, url: &str) -> Result<(), MirrorError> {
        let persistence = |source| MirrorError::Persistence {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(persistence)?;
        writeln!(file, "{}", url).map_err(persistence)?;
        Ok(())
    }

    /// Normalized entries in the order they were first recorded
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of distinct normalized entries
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
