//! Page renderer abstraction
//!
//! The crawler never fetches pages itself. It drives a `PageRenderer`, which
//! owns a single page handle: navigate it, then read the rendered document
//! and its title. Any engine that can produce the rendered HTML of a URL can
//! stand behind this trait.

use async_trait::async_trait;
use scraper::Html;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Navigation to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("No page has been loaded yet")]
    NotLoaded,

    #[error("Failed to launch renderer: {0}")]
    Launch(String),
}

/// Options for a single navigation
///
/// Navigation always waits for network idleness: `navigate` returns only once
/// nothing more is arriving for the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    pub timeout: Duration,
}

impl NavigateOptions {
    pub fn network_idle(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Capability the crawl needs from a browser or browser substitute
#[async_trait]
pub trait PageRenderer: Send {
    /// Loads `url` into the page handle, replacing the previous document
    async fn navigate(&mut self, url: &str, options: &NavigateOptions) -> Result<(), RenderError>;

    /// Rendered HTML of the current document
    async fn content(&self) -> Result<String, RenderError>;

    /// URL of the current document after redirects
    async fn current_url(&self) -> Result<String, RenderError>;

    /// Title of the current document
    async fn title(&self) -> Result<String, RenderError>;
}

/// Runs `f` against the current document of `renderer`
///
/// This is the Rust shape of evaluating a function inside the page: the
/// rendered HTML is parsed once and handed to the closure, and whatever the
/// closure returns is the extracted value.
pub async fn evaluate<R, T, F>(renderer: &R, f: F) -> Result<T, RenderError>
where
    R: PageRenderer + ?Sized,
    F: FnOnce(&Html) -> T,
{
    let html = renderer.content().await?;
    let document = Html::parse_document(&html);
    Ok(f(&document))
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted renderer used by crawler tests

    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Scripted response for one URL
    #[derive(Debug, Clone)]
    pub enum FakePage {
        Html { title: String, html: String },
        Fail(String),
        Hang,
    }

    /// Renderer returning canned documents per URL
    #[derive(Debug, Clone, Default)]
    pub struct FakeRenderer {
        pages: HashMap<String, FakePage>,
        current: Option<(String, String, String)>,
        pub visited: Arc<Mutex<Vec<String>>>,
        pub options: Arc<Mutex<Vec<NavigateOptions>>>,
    }

    impl FakeRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, title: &str, html: &str) -> Self {
            self.pages.insert(
                url.to_string(),
                FakePage::Html {
                    title: title.to_string(),
                    html: html.to_string(),
                },
            );
            self
        }

        pub fn with_failure(mut self, url: &str, message: &str) -> Self {
            self.pages
                .insert(url.to_string(), FakePage::Fail(message.to_string()));
            self
        }

        pub fn with_hang(mut self, url: &str) -> Self {
            self.pages.insert(url.to_string(), FakePage::Hang);
            self
        }
    }

    #[async_trait]
    impl PageRenderer for FakeRenderer {
        async fn navigate(
            &mut self,
            url: &str,
            options: &NavigateOptions,
        ) -> Result<(), RenderError> {
            self.visited.lock().unwrap().push(url.to_string());
            self.options.lock().unwrap().push(*options);
            match self.pages.get(url).cloned() {
                Some(FakePage::Html { title, html }) => {
                    self.current = Some((url.to_string(), title, html));
                    Ok(())
                }
                Some(FakePage::Fail(message)) => Err(RenderError::Navigation {
                    url: url.to_string(),
                    message,
                }),
                Some(FakePage::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(())
                }
                None => Err(RenderError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }

        async fn content(&self) -> Result<String, RenderError> {
            self.current
                .as_ref()
                .map(|(_, _, html)| html.clone())
                .ok_or(RenderError::NotLoaded)
        }

        async fn current_url(&self) -> Result<String, RenderError> {
            self.current
                .as_ref()
                .map(|(url, _, _)| url.clone())
                .ok_or(RenderError::NotLoaded)
        }

        async fn title(&self) -> Result<String, RenderError> {
            self.current
                .as_ref()
                .map(|(_, title, _)| title.clone())
                .ok_or(RenderError::NotLoaded)
        }
    }
}
