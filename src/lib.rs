//! Doc-Scraper: documentation site to study material converter
//!
//! This crate crawls a documentation website page by page, extracts the main
//! content of every page, derives key points and question/answer pairs from it,
//! and writes the result as a Markdown digest, CSV tables, an Anki deck and a
//! JSON dump.

pub mod annotate;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod text;

use thiserror::Error;

/// Main error type for Doc-Scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to launch page renderer: {0}")]
    RendererLaunch(String),

    #[error("Failed to load index page {url}: {source}")]
    IndexPage {
        url: String,
        source: crawler::RenderError,
    },

    #[error("Render error: {0}")]
    Render(#[from] crawler::RenderError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::PageState,
        to: state::PageState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read presets file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("No target URL given for preset '{0}'")]
    MissingUrl(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Doc-Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{CrawlConfig, OutputFormat};
pub use crawler::{run_crawl, Coordinator, HttpRenderer, PageRenderer};
pub use output::{convert_archive, CrawlReport, OutputArtifact, PageRecord, QaPair};
pub use state::PageState;
