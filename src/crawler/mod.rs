//! Crawler module for page rendering and processing
//!
//! This module contains the core crawling logic, including:
//! - The page renderer capability and its HTTP implementation
//! - Link discovery and work queue construction
//! - Main content extraction
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod links;
mod renderer;

pub use coordinator::{run_crawl, Coordinator, MIN_CONTENT_CHARS};
pub use extractor::{ContentExtractor, STRIP_SELECTOR};
pub use fetcher::{build_http_client, HttpRenderer};
pub use links::{
    build_link_set, collect_link_candidates, is_eligible, LinkRecord, MAX_LINK_TEXT_CHARS,
};
pub use renderer::{evaluate, NavigateOptions, PageRenderer, RenderError};
