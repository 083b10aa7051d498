use crate::config::types::CrawlConfig;
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;
    validate_selectors(config)?;
    validate_limits(config)?;
    Ok(())
}

/// Validates the site URL: must parse and use http or https
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' must use http or https",
            base_url
        )));
    }

    Ok(())
}

/// Validates every CSS selector the crawl will evaluate
fn validate_selectors(config: &CrawlConfig) -> Result<(), ConfigError> {
    parse_selector(&config.content_selector)?;
    parse_selector(&config.link_selector)?;
    for selector in &config.fallback_selectors {
        parse_selector(selector)?;
    }
    Ok(())
}

/// Validates timing and bounding values
fn validate_limits(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.timeout.is_zero() {
        return Err(ConfigError::Validation(
            "timeout must be greater than 0ms".to_string(),
        ));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max_pages must be >= 1 when set".to_string(),
        ));
    }

    if config.output.combined_file.trim().is_empty() {
        return Err(ConfigError::Validation(
            "combined file name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Parses a CSS selector, mapping failures to a config error
pub fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
