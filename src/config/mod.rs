//! Configuration module for Doc-Scraper
//!
//! This module handles loading site presets from TOML, merging command-line
//! overrides over them, and validating the resulting run configuration.
//!
//! # Example
//!
//! ```no_run
//! use doc_scraper::config::{load_presets, resolve_config, CrawlOverrides};
//! use std::path::Path;
//!
//! let presets = load_presets(Path::new("presets.toml")).unwrap();
//! let config = resolve_config(&presets, "vue", CrawlOverrides::default()).unwrap();
//! println!("Index page: {}", config.index_url());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_user_agent, CrawlConfig, CrawlOverrides, OutputConfig, OutputFormat, Preset,
    PresetFile, CUSTOM_PRESET, DEFAULT_REQUEST_DELAY_MS,
};

// Re-export parser functions
pub use parser::{load_presets, load_presets_or_default, parse_presets, resolve_config};
pub use validation::{parse_selector, validate};
