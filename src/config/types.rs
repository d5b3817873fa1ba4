use crate::ledger::{DISCOVERED_LOG_NAME, VISITED_LOG_NAME};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for Site-Mirror
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Output directory as a path
    pub fn output_dir(&self) -> &Path {
        Path::new(&self.output.output_dir)
    }

    /// Visited log path, defaulting to `links.txt` in the output directory
    pub fn links_file_path(&self) -> PathBuf {
        match &self.output.links_file {
            Some(path) => PathBuf::from(path),
            None => self.output_dir().join(VISITED_LOG_NAME),
        }
    }

    /// Discovered log path, defaulting to `parsed_links.txt` in the output directory
    pub fn parsed_links_file_path(&self) -> PathBuf {
        match &self.output.parsed_links_file {
            Some(path) => PathBuf::from(path),
            None => self.output_dir().join(DISCOVERED_LOG_NAME),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Link depth requested by the user; reported, not enforced
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Pause after each successfully mirrored URL (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Whole-request timeout for the renderer (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout for the renderer (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl CrawlerConfig {
    /// Delay between fetches as a `Duration`
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            request_delay_ms: 3000,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "site-mirror".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory of the mirror
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Visited log override
    #[serde(rename = "links-file")]
    pub links_file: Option<String>,

    /// Discovered log override
    #[serde(rename = "parsed-links-file")]
    pub parsed_links_file: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: "./output".to_string(),
            links_file: None,
            parsed_links_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.crawler.max_depth, 1);
        assert_eq!(config.crawler.request_delay(), Duration::from_secs(3));
        assert_eq!(config.output.output_dir, "./output");
        assert_eq!(config.user_agent.crawler_name, "site-mirror");
    }

    #[test]
    fn test_default_log_paths() {
        let config = Config::default();
        assert_eq!(
            config.links_file_path(),
            Path::new("./output").join("links.txt")
        );
        assert_eq!(
            config.parsed_links_file_path(),
            Path::new("./output").join("parsed_links.txt")
        );
    }

    #[test]
    fn test_log_path_overrides() {
        let mut config = Config::default();
        config.output.links_file = Some("/tmp/visited.txt".to_string());
        config.output.parsed_links_file = Some("/tmp/found.txt".to_string());

        assert_eq!(config.links_file_path(), PathBuf::from("/tmp/visited.txt"));
        assert_eq!(
            config.parsed_links_file_path(),
            PathBuf::from("/tmp/found.txt")
        );
    }

    #[test]
    fn test_user_agent_header() {
        let ua = UserAgentConfig {
            crawler_name: "TestMirror".to_string(),
            crawler_version: "1.0".to_string(),
        };
        assert_eq!(ua.header_value(), "TestMirror/1.0");
    }
}
