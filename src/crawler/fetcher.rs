//! HTTP page renderer
//!
//! This module provides the default `PageRenderer`, built on plain HTTP:
//! - Building the HTTP client with a browser-like user agent
//! - GET requests bounded by the navigation timeout
//! - Redirect following (limited)
//! - Error classification into `RenderError`
//!
//! There is no script execution, so client-rendered sites need a real
//! browser behind the `PageRenderer` trait instead.

use crate::config::CrawlConfig;
use crate::crawler::renderer::{NavigateOptions, PageRenderer, RenderError};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use scraper::{Html, Selector};
use std::time::Duration;

/// The document currently held by the page handle
#[derive(Debug, Clone)]
struct LoadedPage {
    final_url: String,
    body: String,
    title: String,
}

/// `PageRenderer` backed by a reqwest client and scraper
pub struct HttpRenderer {
    client: Client,
    current: Option<LoadedPage>,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - User agent string sent with every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

impl HttpRenderer {
    /// Creates the renderer for a run
    ///
    /// A failure here is the "renderer launch failure" that aborts the run.
    pub fn new(config: &CrawlConfig) -> Result<Self, RenderError> {
        let client =
            build_http_client(&config.user_agent).map_err(|e| RenderError::Launch(e.to_string()))?;
        Ok(Self {
            client,
            current: None,
        })
    }

    fn loaded(&self) -> Result<&LoadedPage, RenderError> {
        self.current.as_ref().ok_or(RenderError::NotLoaded)
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    /// Fetches `url` and keeps its body as the current document
    ///
    /// # Error Classification
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Timeout | `RenderError::Timeout` |
    /// | Non-2xx status | `RenderError::Status` |
    /// | Connection/TLS/body error | `RenderError::Navigation` |
    ///
    /// A fully read body is treated as network idle; there are no
    /// background requests to wait for.
    async fn navigate(&mut self, url: &str, options: &NavigateOptions) -> Result<(), RenderError> {
        let response = self
            .client
            .get(url)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, options.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| classify_error(url, options.timeout, e))?;
        let title = extract_title(&body).unwrap_or_default();

        tracing::debug!("Loaded {} ({} bytes)", final_url, body.len());

        self.current = Some(LoadedPage {
            final_url,
            body,
            title,
        });

        Ok(())
    }

    async fn content(&self) -> Result<String, RenderError> {
        Ok(self.loaded()?.body.clone())
    }

    async fn current_url(&self) -> Result<String, RenderError> {
        Ok(self.loaded()?.final_url.clone())
    }

    async fn title(&self) -> Result<String, RenderError> {
        Ok(self.loaded()?.title.clone())
    }
}

fn classify_error(url: &str, timeout: Duration, error: reqwest::Error) -> RenderError {
    if error.is_timeout() {
        RenderError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else if error.is_connect() {
        RenderError::Navigation {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        RenderError::Navigation {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// Extracts the page title from an HTML document
fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
