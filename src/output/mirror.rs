//! Mirror writer: maps URLs onto the output directory and writes their content
//!
//! The mapping keeps the URL path as the relative file path, so a site's directory
//! layout is reproduced one-to-one under the output root. Query strings and fragments
//! do not take part in the mapping.

use crate::{MirrorError, UrlError};
use std::path::{Path, PathBuf};
use url::Url;

/// File name used for the site root and for directory-style paths
pub const INDEX_FILE: &str = "index.html";

/// Maps a URL to its file path relative to the mirror root
///
/// # Mapping Rules
///
/// 1. Empty path or `/` becomes `index.html`
/// 2. Otherwise the leading `/` is removed and runs of `/` collapse into one
/// 3. A path ending in `/` gets `index.html` appended
/// 4. With an extension, `.ext` is appended when the last segment has none
///
/// The function is pure: it never touches the file system.
///
/// # Examples
///
/// ```
/// use site_mirror::output::mirror_path;
/// use std::path::PathBuf;
///
/// assert_eq!(mirror_path("https://site.com/", None).unwrap(), PathBuf::from("index.html"));
/// assert_eq!(mirror_path("https://site.com/a/b", None).unwrap(), PathBuf::from("a/b"));
/// assert_eq!(mirror_path("https://site.com/img", Some("png")).unwrap(), PathBuf::from("img.png"));
/// ```
pub fn mirror_path(url_str: &str, extension: Option<&str>) -> Result<PathBuf, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(format!("{}: {}", url_str, e)))?;
    if url.cannot_be_a_base() {
        return Err(UrlError::MissingPath(url_str.to_string()));
    }

    let mut relative = collapse_slashes(url.path().trim_start_matches('/'));
    if relative.is_empty() {
        relative = INDEX_FILE.to_string();
    } else if relative.ends_with('/') {
        relative.push_str(INDEX_FILE);
    }

    if let Some(ext) = extension {
        if !has_extension(&relative) {
            relative = format!("{}.{}", relative, ext);
        }
    }

    Ok(PathBuf::from(relative))
}

/// Collapses every run of `/` into a single `/`
fn collapse_slashes(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous_slash = false;

    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                collapsed.push(c);
            }
            previous_slash = true;
        } else {
            collapsed.push(c);
            previous_slash = false;
        }
    }

    collapsed
}

/// Returns true if the last path segment carries an extension
fn has_extension(relative: &str) -> bool {
    let segment = relative.rsplit('/').next().unwrap_or_default();
    Path::new(segment).extension().is_some()
}

/// Writes mirrored content below a root directory
#[derive(Debug, Clone)]
pub struct MirrorWriter {
    root: PathBuf,
}

impl MirrorWriter {
    /// Creates a writer rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the mirror
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full on-disk path for a URL
    pub fn output_path(&self, url: &str, extension: Option<&str>) -> Result<PathBuf, UrlError> {
        Ok(self.root.join(mirror_path(url, extension)?))
    }

    /// Writes `content` for `url`, creating parent directories as needed
    ///
    /// Returns the path that was written.
    pub async fn write(
        &self,
        url: &str,
        extension: Option<&str>,
        content: &[u8],
    ) -> Result<PathBuf, MirrorError> {
        let path = self.output_path(url, extension)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;

        tracing::info!("Saved {} bytes to: {}", content.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_root_maps_to_index() {
        assert_eq!(
            mirror_path("https://site.com/", None).unwrap(),
            PathBuf::from("index.html")
        );
        assert_eq!(
            mirror_path("https://site.com", None).unwrap(),
            PathBuf::from("index.html")
        );
        assert_eq!(
            mirror_path("https://site.com", Some("html")).unwrap(),
            PathBuf::from("index.html")
        );
    }

    #[test]
    fn test_nested_path_kept() {
        assert_eq!(
            mirror_path("https://site.com/a/b", None).unwrap(),
            PathBuf::from("a/b")
        );
    }

    #[test]
    fn test_extension_appended_when_missing() {
        assert_eq!(
            mirror_path("https://site.com/img", Some("png")).unwrap(),
            PathBuf::from("img.png")
        );
    }

    #[test]
    fn test_existing_extension_kept() {
        assert_eq!(
            mirror_path("https://site.com/cipai/1.html", Some("html")).unwrap(),
            PathBuf::from("cipai/1.html")
        );
        assert_eq!(
            mirror_path("https://site.com/logo.jpeg", Some("jpg")).unwrap(),
            PathBuf::from("logo.jpeg")
        );
    }

    #[test]
    fn test_dot_in_directory_does_not_count() {
        assert_eq!(
            mirror_path("https://site.com/v1.2/page", Some("html")).unwrap(),
            PathBuf::from("v1.2/page.html")
        );
    }

    #[test]
    fn test_repeated_slashes_collapsed() {
        assert_eq!(
            mirror_path("https://site.com//a///b", None).unwrap(),
            PathBuf::from("a/b")
        );
    }

    #[test]
    fn test_directory_style_path() {
        assert_eq!(
            mirror_path("https://site.com/docs/", Some("html")).unwrap(),
            PathBuf::from("docs/index.html")
        );
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        assert_eq!(
            mirror_path("https://site.com/search?q=x#top", Some("html")).unwrap(),
            PathBuf::from("search.html")
        );
    }

    #[test]
    fn test_idempotent() {
        let first = mirror_path("https://site.com/a/b", Some("css")).unwrap();
        let second = mirror_path("https://site.com/a/b", Some("css")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            mirror_path("not a url", None),
            Err(UrlError::Parse(_))
        ));
        assert!(matches!(
            mirror_path("mailto:someone@site.com", None),
            Err(UrlError::MissingPath(_))
        ));
    }

    #[test]
    fn test_output_path_joins_root() {
        let writer = MirrorWriter::new("/tmp/mirror");
        assert_eq!(
            writer.output_path("https://site.com/a/b", Some("html")).unwrap(),
            PathBuf::from("/tmp/mirror/a/b.html")
        );
    }

    #[tokio::test]
    async fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let writer = MirrorWriter::new(dir.path());

        let path = writer
            .write("https://site.com/deep/nested/page", Some("html"), b"<html></html>")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("deep/nested/page.html"));
        assert_eq!(std::fs::read(&path).unwrap(), b"<html></html>");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let writer = MirrorWriter::new(dir.path());

        writer.write("https://site.com/", None, b"old").await.unwrap();
        let path = writer.write("https://site.com/", None, b"new").await.unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }
}
