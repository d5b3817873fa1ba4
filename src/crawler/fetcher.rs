//! Page fetching through a pluggable renderer
//!
//! This module handles:
//! - The `Renderer` trait the coordinator fetches through
//! - An HTTP implementation built on reqwest
//! - Content-Type probing (HEAD, falling back to GET)
//!
//! A renderer owns a session (an HTTP client here, a browser for a headless
//! implementation). The coordinator acquires it before draining the frontier and
//! releases it on every exit path, so implementations can hold real resources.

use crate::config::{Config, CrawlerConfig, UserAgentConfig};
use crate::MirrorError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::Duration;

/// Content type reported when a response carries none
pub const UNKNOWN_CONTENT_TYPE: &str = "unknown";

/// A fetched resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// URL the content was finally served from (after redirects)
    pub final_url: String,

    /// Content-Type header value, or `unknown`
    pub content_type: String,

    /// Raw body bytes
    pub body: Vec<u8>,
}

impl RenderedPage {
    /// Returns true if the content type denotes HTML
    pub fn is_html(&self) -> bool {
        is_html_content_type(&self.content_type)
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Returns true if a Content-Type value denotes HTML (`text/html`, any parameters)
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// Source of page content for the crawl loop
///
/// Every method may fail; the coordinator treats a failure as affecting only the URL
/// being processed.
#[async_trait]
pub trait Renderer: Send {
    /// Opens the session. Calling it on an open session is a no-op.
    async fn acquire(&mut self) -> Result<(), MirrorError>;

    /// Fetches a URL and returns its body and content type
    async fn fetch(&mut self, url: &str) -> Result<RenderedPage, MirrorError>;

    /// Determines a URL's content type without keeping its body
    async fn fetch_content_type(&mut self, url: &str) -> Result<String, MirrorError>;

    /// Closes the session. Calling it on a closed session is a no-op.
    async fn release(&mut self) -> Result<(), MirrorError>;
}

/// Builds an HTTP client with the crawler's identity and timeouts
///
/// # Example
///
/// ```no_run
/// use site_mirror::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(
///     "site-mirror/0.1.0",
///     Duration::from_secs(30),
///     Duration::from_secs(10),
/// )
/// .unwrap();
/// ```
pub fn build_http_client(
    user_agent: &str,
    timeout: Duration,
    connect_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renderer that fetches raw responses over HTTP
///
/// No JavaScript is executed, so "rendered" content is the server's response body.
#[derive(Debug)]
pub struct HttpRenderer {
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    client: Option<Client>,
}

impl HttpRenderer {
    /// Creates a renderer; the client is built on `acquire` or first use
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Self {
        Self {
            user_agent: user_agent.header_value(),
            timeout: Duration::from_secs(crawler.request_timeout_secs),
            connect_timeout: Duration::from_secs(crawler.connect_timeout_secs),
            client: None,
        }
    }

    /// Creates a renderer from a full configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.crawler, &config.user_agent)
    }

    /// Returns true while a client is held
    pub fn is_acquired(&self) -> bool {
        self.client.is_some()
    }

    /// Returns the session client, building it if needed
    fn client(&mut self) -> Result<&Client, MirrorError> {
        if self.client.is_none() {
            let client = build_http_client(&self.user_agent, self.timeout, self.connect_timeout)
                .map_err(|e| MirrorError::Renderer(format!("Failed to build HTTP client: {}", e)))?;
            tracing::info!("HTTP renderer session opened ({})", self.user_agent);
            self.client = Some(client);
        }

        self.client
            .as_ref()
            .ok_or_else(|| MirrorError::Renderer("HTTP client unavailable".to_string()))
    }
}

/// Reads the Content-Type header, defaulting to `unknown`
fn header_content_type(response: &Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(UNKNOWN_CONTENT_TYPE)
        .to_string()
}

/// Sends a GET and rejects non-success statuses
async fn get_checked(client: &Client, url: &str) -> Result<Response, MirrorError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| MirrorError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MirrorError::Fetch {
            url: url.to_string(),
            message: format!("HTTP {}", status.as_u16()),
        });
    }

    Ok(response)
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn acquire(&mut self) -> Result<(), MirrorError> {
        self.client().map(|_| ())
    }

    async fn fetch(&mut self, url: &str) -> Result<RenderedPage, MirrorError> {
        let client = self.client()?;
        let response = get_checked(client, url).await?;

        let final_url = response.url().to_string();
        let content_type = header_content_type(&response);
        let body = response
            .bytes()
            .await
            .map_err(|source| MirrorError::Http {
                url: url.to_string(),
                source,
            })?
            .to_vec();

        Ok(RenderedPage {
            final_url,
            content_type,
            body,
        })
    }

    async fn fetch_content_type(&mut self, url: &str) -> Result<String, MirrorError> {
        let client = self.client()?;

        match client.head(url).send().await {
            Ok(response) if response.status().is_success() => {
                return Ok(header_content_type(&response));
            }
            Ok(response) => {
                tracing::debug!(
                    "HEAD {} returned {}, falling back to GET",
                    url,
                    response.status()
                );
            }
            Err(e) => {
                tracing::debug!("HEAD {} failed ({}), falling back to GET", url, e);
            }
        }

        let response = get_checked(client, url).await?;
        Ok(header_content_type(&response))
    }

    async fn release(&mut self) -> Result<(), MirrorError> {
        if self.client.take().is_some() {
            tracing::info!("HTTP renderer session closed");
        }
        Ok(())
    }
}
