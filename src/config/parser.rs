use crate::config::types::{
    CrawlConfig, CrawlOverrides, OutputConfig, PresetFile, DEFAULT_REQUEST_DELAY_MS,
};
use crate::config::validation::validate;
use crate::config::default_user_agent;
use crate::ConfigError;
use std::path::Path;
use std::time::Duration;

/// Loads and parses a presets file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML presets file
///
/// # Returns
///
/// * `Ok(PresetFile)` - Successfully loaded presets
/// * `Err(ConfigError)` - Failed to read or parse the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use doc_scraper::config::load_presets;
///
/// let presets = load_presets(Path::new("presets.toml")).unwrap();
/// println!("{} presets available", presets.presets.len());
/// ```
pub fn load_presets(path: &Path) -> Result<PresetFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_presets(&content)
}

/// Parses presets from TOML text
pub fn parse_presets(content: &str) -> Result<PresetFile, ConfigError> {
    let presets: PresetFile = toml::from_str(content)?;
    Ok(presets)
}

/// Loads presets, treating a missing file as an empty preset list
///
/// The built-in `custom` preset stays available either way, so `quick`
/// runs work without any presets file on disk.
pub fn load_presets_or_default(path: &Path) -> Result<PresetFile, ConfigError> {
    if !path.exists() {
        tracing::debug!("Presets file {} not found, using built-ins", path.display());
        return Ok(PresetFile::default());
    }
    load_presets(path)
}

/// Resolves a preset plus command-line overrides into a validated run config
///
/// # Arguments
///
/// * `presets` - The loaded presets
/// * `preset_name` - Key of the preset to use
/// * `overrides` - Values given on the command line
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Resolved and validated configuration
/// * `Err(ConfigError)` - Unknown preset, missing URL, or invalid values
pub fn resolve_config(
    presets: &PresetFile,
    preset_name: &str,
    overrides: CrawlOverrides,
) -> Result<CrawlConfig, ConfigError> {
    let preset = presets
        .get(preset_name)
        .ok_or_else(|| ConfigError::UnknownPreset(preset_name.to_string()))?;

    let base_url = overrides
        .url
        .or(preset.url)
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingUrl(preset_name.to_string()))?;

    let defaults = OutputConfig::default();
    let output = OutputConfig {
        output_dir: overrides.output_dir.unwrap_or(defaults.output_dir),
        combined_file: overrides.combined_file.unwrap_or(defaults.combined_file),
        format: overrides.format.unwrap_or(defaults.format),
    };

    let config = CrawlConfig {
        name: preset.name,
        base_url: base_url.trim().to_string(),
        index_path: preset.index_path,
        content_selector: overrides
            .content_selector
            .unwrap_or(preset.content_selector),
        link_selector: overrides.link_selector.unwrap_or(preset.link_selector),
        fallback_selectors: preset.fallback_selectors,
        exclude_patterns: preset.exclude_patterns,
        link_filter: preset.link_filter.filter(|f| !f.is_empty()),
        wait_time: Duration::from_millis(overrides.wait_time.unwrap_or(preset.wait_time)),
        timeout: Duration::from_millis(overrides.timeout.unwrap_or(preset.timeout)),
        request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
        // 0 means unbounded, like leaving the option out
        max_pages: overrides.max_pages.filter(|&max| max > 0),
        output,
        generate_qa: overrides.generate_qa,
        generate_summary: !overrides.skip_summary,
        user_agent: default_user_agent(),
    };

    validate(&config)?;

    Ok(config)
}
