//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the sequential crawl loop:
//! - Loading the index page and building the link set
//! - Navigating to each link with a settle delay and a timeout
//! - Extracting, annotating and persisting each page
//! - Isolating per-page failures and counting outcomes
//! - Writing the run-level artifacts at the end

use crate::annotate::annotate;
use crate::config::{parse_selector, CrawlConfig};
use crate::crawler::extractor::ContentExtractor;
use crate::crawler::fetcher::HttpRenderer;
use crate::crawler::links::{build_link_set, collect_link_candidates, LinkRecord};
use crate::crawler::renderer::{evaluate, NavigateOptions, PageRenderer, RenderError};
use crate::output::{
    write_artifacts, write_page_file, CrawlReport, CrawlSession, PageRecord, RunMetadata,
};
use crate::state::PageState;
use crate::text::{char_len, format_bytes};
use crate::ScrapeError;
use scraper::Selector;
use std::path::{Path, PathBuf};
use url::Url;

/// Pages with this many chars of content or fewer are classified as empty
pub const MIN_CONTENT_CHARS: usize = 50;

/// What processing one link produced
struct LinkOutcome {
    state: PageState,
    page: Option<(PageRecord, PathBuf)>,
}

impl LinkOutcome {
    fn failed(state: PageState) -> Self {
        Self { state, page: None }
    }
}

/// Main crawler coordinator structure
///
/// Owns the renderer and the resolved config for the whole run. One page
/// handle is reused for every navigation.
pub struct Coordinator<R: PageRenderer> {
    config: CrawlConfig,
    renderer: R,
    extractor: ContentExtractor,
    link_selector: Selector,
}

impl<R: PageRenderer> Coordinator<R> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The resolved crawl configuration
    /// * `renderer` - The page renderer used for every navigation
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Selectors compiled
    /// * `Err(ScrapeError)` - A configured selector does not parse
    pub fn new(config: CrawlConfig, renderer: R) -> Result<Self, ScrapeError> {
        let extractor = ContentExtractor::new(&config)?;
        let link_selector = parse_selector(&config.link_selector)?;

        Ok(Self {
            config,
            renderer,
            extractor,
            link_selector,
        })
    }

    /// Runs the crawl to completion
    ///
    /// Only a failure to load the index page, create the output directory,
    /// or write a run-level artifact aborts the run. Every per-link failure
    /// is counted and skipped.
    pub async fn run(mut self) -> Result<CrawlReport, ScrapeError> {
        let index_url = self.config.index_url();
        tracing::info!("Opening index page: {}", index_url);

        self.navigate(&index_url)
            .await
            .map_err(|source| ScrapeError::IndexPage {
                url: index_url.clone(),
                source,
            })?;
        tokio::time::sleep(self.config.wait_time).await;

        if let Ok(title) = self.renderer.title().await {
            tracing::debug!("Index page title: {}", title);
        }

        let links = self.discover_links().await?;
        tracing::info!("Found {} pages to crawl", links.len());

        let content_dir = self.config.output.content_dir();
        std::fs::create_dir_all(&content_dir)?;

        let mut session = CrawlSession::new(RunMetadata {
            name: self.config.name.clone(),
            site_url: self.config.base_url.clone(),
            crawled_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            page_count: links.len(),
            generate_qa: self.config.generate_qa,
        });
        let mut page_files = Vec::new();

        for (position, link) in links.iter().enumerate() {
            let outcome = self
                .process_link(position + 1, links.len(), link, &content_dir)
                .await?;

            match outcome.page {
                Some((page, path)) => {
                    session.record_success(page);
                    page_files.push(path);
                }
                None => session.record_failure(),
            }
            tracing::debug!("{} -> {}", link.href, outcome.state);

            tokio::time::sleep(self.config.request_delay).await;
        }

        tracing::info!(
            "Crawl finished: {} succeeded, {} failed",
            session.success_count,
            session.fail_count
        );

        let artifacts = write_artifacts(&session, &self.config.output)?;

        Ok(CrawlReport {
            success_count: session.success_count,
            fail_count: session.fail_count,
            artifacts,
            page_files,
            pages: session.pages,
        })
    }

    /// Navigates the page handle, bounded by the configured timeout
    async fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        let timeout = self.config.timeout;
        let options = NavigateOptions::network_idle(timeout);

        match tokio::time::timeout(timeout, self.renderer.navigate(url, &options)).await {
            Ok(result) => result,
            Err(_) => Err(RenderError::Timeout {
                url: url.to_string(),
                timeout,
            }),
        }
    }

    /// Evaluates the link selector on the index page and builds the link set
    async fn discover_links(&self) -> Result<Vec<LinkRecord>, ScrapeError> {
        let current = self.renderer.current_url().await?;
        let base_url = Url::parse(&current).map_err(|e| RenderError::Navigation {
            url: current.clone(),
            message: e.to_string(),
        })?;

        let selector = &self.link_selector;
        let candidates = evaluate(&self.renderer, |document| {
            collect_link_candidates(document, selector, &base_url)
        })
        .await?;
        tracing::debug!("Index page yielded {} link candidates", candidates.len());

        Ok(build_link_set(candidates, &self.config))
    }

    /// Processes one link of the work queue
    ///
    /// Per-page problems end in a failure state and never propagate; the only
    /// error returned is an invalid state transition.
    async fn process_link(
        &mut self,
        index: usize,
        total: usize,
        link: &LinkRecord,
        content_dir: &Path,
    ) -> Result<LinkOutcome, ScrapeError> {
        let progress = format!("[{:>3}/{}]", index, total);
        let mut state = PageState::Pending;
        advance(&mut state, PageState::Navigating)?;

        if let Err(e) = self.navigate(&link.href).await {
            tracing::warn!("{} {} - navigation failed: {}", progress, link.text, e);
            advance(&mut state, PageState::NavigationFailed)?;
            return Ok(LinkOutcome::failed(state));
        }
        tokio::time::sleep(self.config.wait_time).await;

        let extractor = &self.extractor;
        let content = match evaluate(&self.renderer, |document| extractor.extract(document)).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("{} {} - page unavailable: {}", progress, link.text, e);
                advance(&mut state, PageState::NavigationFailed)?;
                return Ok(LinkOutcome::failed(state));
            }
        };

        let length = char_len(&content);
        if length <= MIN_CONTENT_CHARS {
            tracing::warn!(
                "{} {} - content too short ({} chars)",
                progress,
                link.text,
                length
            );
            advance(&mut state, PageState::Empty)?;
            return Ok(LinkOutcome::failed(state));
        }

        let notes = annotate(
            &link.text,
            &content,
            self.config.generate_summary,
            self.config.generate_qa,
        );
        let page = PageRecord {
            index,
            title: link.text.clone(),
            url: link.href.clone(),
            content,
            key_points: notes.key_points,
            qa: notes.qa,
        };

        let path = match write_page_file(content_dir, &page) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("{} {} - {}", progress, link.text, e);
                advance(&mut state, PageState::WriteFailed)?;
                return Ok(LinkOutcome::failed(state));
            }
        };

        tracing::info!(
            "{} {} ({})",
            progress,
            page.title,
            format_bytes(page.content.len())
        );
        advance(&mut state, PageState::Extracted)?;

        Ok(LinkOutcome {
            state,
            page: Some((page, path)),
        })
    }
}

/// Moves `state` to `next` if the state machine allows it
fn advance(state: &mut PageState, next: PageState) -> Result<(), ScrapeError> {
    if !state.can_transition_to(next) {
        return Err(ScrapeError::InvalidTransition {
            from: *state,
            to: next,
        });
    }
    *state = next;
    Ok(())
}

/// Runs a complete crawl with the HTTP renderer
///
/// # Arguments
///
/// * `config` - The resolved crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Counts, artifacts and page records of the run
/// * `Err(ScrapeError)` - A fatal condition aborted the run
pub async fn run_crawl(config: CrawlConfig) -> Result<CrawlReport, ScrapeError> {
    let renderer =
        HttpRenderer::new(&config).map_err(|e| ScrapeError::RendererLaunch(e.to_string()))?;

    tracing::info!("Starting crawl of {} ({})", config.name, config.base_url);
    Coordinator::new(config, renderer)?.run().await
}
