use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::ConfigError;

/// Name of the preset used by `quick` runs and as the built-in fallback
pub const CUSTOM_PRESET: &str = "custom";

/// Delay inserted after every crawled link, independent of the settle delay
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 300;

/// Contents of a presets file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresetFile {
    #[serde(default)]
    pub presets: BTreeMap<String, Preset>,
}

impl PresetFile {
    /// Looks up a preset by key, falling back to the built-in `custom` preset
    pub fn get(&self, key: &str) -> Option<Preset> {
        match self.presets.get(key) {
            Some(preset) => Some(preset.clone()),
            None if key == CUSTOM_PRESET => Some(Preset::custom()),
            None => None,
        }
    }
}

/// Site-specific selectors and URLs for one documentation site
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Preset {
    /// Human-readable site name, used as the digest heading
    pub name: String,

    /// Site base URL (may be supplied on the command line instead)
    #[serde(default)]
    pub url: Option<String>,

    /// Path of the index page, appended to the base URL
    #[serde(default)]
    pub index_path: String,

    #[serde(default = "default_content_selector")]
    pub content_selector: String,

    #[serde(default = "default_link_selector")]
    pub link_selector: String,

    /// Tried in order when the content selector matches nothing
    #[serde(default)]
    pub fallback_selectors: Vec<String>,

    /// Links whose href contains any of these are skipped
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// When set, only links whose href contains it are kept
    #[serde(default)]
    pub link_filter: Option<String>,

    /// Settle delay after navigation (milliseconds)
    #[serde(default = "default_wait_time")]
    pub wait_time: u64,

    /// Navigation timeout (milliseconds)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Preset {
    /// Generic preset for sites without a dedicated entry
    pub fn custom() -> Self {
        Self {
            name: "Custom Site".to_string(),
            url: None,
            index_path: String::new(),
            content_selector: default_content_selector(),
            link_selector: default_link_selector(),
            fallback_selectors: vec![
                "article".to_string(),
                ".content".to_string(),
                "#content".to_string(),
                "body".to_string(),
            ],
            exclude_patterns: vec!["#".to_string(), ".pdf".to_string(), ".zip".to_string()],
            link_filter: None,
            wait_time: default_wait_time(),
            timeout: default_timeout(),
        }
    }
}

fn default_content_selector() -> String {
    "main".to_string()
}

fn default_link_selector() -> String {
    "a[href]".to_string()
}

fn default_wait_time() -> u64 {
    1000
}

fn default_timeout() -> u64 {
    30000
}

/// Which artifacts a run writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Csv,
    Anki,
    Json,
    All,
}

impl OutputFormat {
    pub fn includes_markdown(&self) -> bool {
        matches!(self, Self::Markdown | Self::All)
    }

    pub fn includes_csv(&self) -> bool {
        matches!(self, Self::Csv | Self::All)
    }

    pub fn includes_anki(&self) -> bool {
        matches!(self, Self::Anki | Self::All)
    }

    pub fn includes_json(&self) -> bool {
        matches!(self, Self::Json | Self::All)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Csv => "csv",
            Self::Anki => "anki",
            Self::Json => "json",
            Self::All => "all",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            "anki" => Ok(Self::Anki),
            "json" => Ok(Self::Json),
            "all" => Ok(Self::All),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output location and format selection
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory receiving all artifacts
    pub output_dir: PathBuf,

    /// File name of the Markdown digest inside `output_dir`
    pub combined_file: String,

    pub format: OutputFormat,
}

impl OutputConfig {
    /// Directory holding one Markdown file per crawled page
    pub fn content_dir(&self) -> PathBuf {
        self.output_dir.join("content")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            combined_file: "combined.md".to_string(),
            format: OutputFormat::default(),
        }
    }
}

/// Fully resolved run parameters, immutable for the duration of a crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub name: String,
    pub base_url: String,
    pub index_path: String,
    pub content_selector: String,
    pub link_selector: String,
    pub fallback_selectors: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub link_filter: Option<String>,

    /// Settle delay after each navigation
    pub wait_time: Duration,

    /// Upper bound for a single navigation
    pub timeout: Duration,

    /// Throttle delay after every link, whatever its outcome
    pub request_delay: Duration,

    /// `None` means unbounded
    pub max_pages: Option<usize>,

    pub output: OutputConfig,

    /// Derive question/answer pairs for every page
    pub generate_qa: bool,

    /// Derive key points for every page
    pub generate_summary: bool,

    pub user_agent: String,
}

impl CrawlConfig {
    /// URL of the page whose links enumerate the documentation
    pub fn index_url(&self) -> String {
        let base = self.base_url.as_str();
        let path = self.index_path.as_str();
        match (base.ends_with('/'), path.starts_with('/')) {
            (true, true) => format!("{}{}", base, &path[1..]),
            _ => format!("{}{}", base, path),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        let preset = Preset::custom();
        Self {
            name: preset.name,
            base_url: String::new(),
            index_path: preset.index_path,
            content_selector: preset.content_selector,
            link_selector: preset.link_selector,
            fallback_selectors: preset.fallback_selectors,
            exclude_patterns: preset.exclude_patterns,
            link_filter: None,
            wait_time: Duration::from_millis(preset.wait_time),
            timeout: Duration::from_millis(preset.timeout),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            max_pages: None,
            output: OutputConfig::default(),
            generate_qa: false,
            generate_summary: true,
            user_agent: default_user_agent(),
        }
    }
}

/// Browser-like user agent sent with every request
pub fn default_user_agent() -> String {
    concat!(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) ",
        "AppleWebKit/537.36 (KHTML, like Gecko) doc-scraper/1.0"
    )
    .to_string()
}

/// Command-line values that take precedence over the preset
#[derive(Debug, Clone, Default)]
pub struct CrawlOverrides {
    pub url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub combined_file: Option<String>,
    pub content_selector: Option<String>,
    pub link_selector: Option<String>,
    pub wait_time: Option<u64>,
    pub timeout: Option<u64>,
    pub max_pages: Option<usize>,
    pub format: Option<OutputFormat>,
    pub generate_qa: bool,
    pub skip_summary: bool,
}
