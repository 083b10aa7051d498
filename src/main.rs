//! Doc-Scraper main entry point
//!
//! This is the command-line interface for the documentation crawler.

use clap::{Args, Parser, Subcommand};
use doc_scraper::config::{
    load_presets_or_default, resolve_config, CrawlOverrides, OutputFormat, CUSTOM_PRESET,
};
use doc_scraper::output::{convert_archive, print_report};
use doc_scraper::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Doc-Scraper: turn documentation sites into study material
///
/// Doc-Scraper crawls every page linked from a documentation index, extracts
/// the main content, and writes it as a Markdown digest, CSV tables, an Anki
/// deck or a JSON dump.
#[derive(Parser, Debug)]
#[command(name = "doc-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Documentation crawler and study material generator", long_about = None)]
struct Cli {
    /// Path to the presets TOML file
    #[arg(long, global = true, default_value = "presets.toml")]
    presets: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available site presets
    List,

    /// Crawl a site using a named preset
    Scrape {
        /// Preset key from the presets file
        preset: String,

        /// Override the preset's site URL
        #[arg(long)]
        url: Option<String>,

        /// Override the main content selector
        #[arg(long)]
        content_selector: Option<String>,

        /// Override the index link selector
        #[arg(long)]
        link_selector: Option<String>,

        /// Settle delay after each navigation (ms)
        #[arg(long)]
        wait: Option<u64>,

        /// Navigation timeout (ms)
        #[arg(long)]
        timeout: Option<u64>,

        /// File name of the Markdown digest
        #[arg(long)]
        combined: Option<String>,

        /// Skip key point extraction
        #[arg(long)]
        no_summary: bool,

        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Crawl any site with the generic preset
    Quick {
        /// Site URL
        url: String,

        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Convert an existing Markdown digest to CSV or an Anki deck
    Convert {
        /// Markdown digest written by an earlier run
        input: PathBuf,

        /// Target format: csv or anki
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
}

/// Options shared by every crawling command
#[derive(Args, Debug)]
struct CrawlArgs {
    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: md, csv, anki, json or all
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Maximum number of pages to crawl
    #[arg(short, long)]
    max_pages: Option<usize>,

    /// Generate question/answer pairs
    #[arg(long)]
    qa: bool,
}

impl CrawlArgs {
    fn into_overrides(self) -> CrawlOverrides {
        CrawlOverrides {
            output_dir: self.output,
            format: self.format,
            max_pages: self.max_pages,
            generate_qa: self.qa,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::List => handle_list(&cli.presets)?,
        Command::Scrape {
            preset,
            url,
            content_selector,
            link_selector,
            wait,
            timeout,
            combined,
            no_summary,
            crawl,
        } => {
            let overrides = CrawlOverrides {
                url,
                content_selector,
                link_selector,
                wait_time: wait,
                timeout,
                combined_file: combined,
                skip_summary: no_summary,
                ..crawl.into_overrides()
            };
            handle_crawl(&cli.presets, &preset, overrides).await?;
        }
        Command::Quick { url, crawl } => {
            let overrides = CrawlOverrides {
                url: Some(url),
                ..crawl.into_overrides()
            };
            handle_crawl(&cli.presets, CUSTOM_PRESET, overrides).await?;
        }
        Command::Convert { input, format } => handle_convert(&input, &format)?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doc_scraper=info,warn"),
            1 => EnvFilter::new("doc_scraper=debug,info"),
            2 => EnvFilter::new("doc_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `list`: prints every preset with its site URL
fn handle_list(presets_path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let presets = load_presets_or_default(presets_path)?;

    println!("Available presets ({}):\n", presets_path.display());
    for (key, preset) in &presets.presets {
        let url = preset.url.as_deref().unwrap_or("(pass --url)");
        println!("  {:<16} {} - {}", key, preset.name, url);
    }
    if !presets.presets.contains_key(CUSTOM_PRESET) {
        println!("  {:<16} Custom Site - (pass --url)", CUSTOM_PRESET);
    }

    Ok(())
}

/// Handles `scrape` and `quick`: resolves the config and runs the crawl
async fn handle_crawl(
    presets_path: &std::path::Path,
    preset: &str,
    overrides: CrawlOverrides,
) -> Result<(), Box<dyn std::error::Error>> {
    let presets = load_presets_or_default(presets_path)?;
    let config = match resolve_config(&presets, preset, overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to resolve preset '{}': {}", preset, e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Output: {} (format: {})",
        config.output.output_dir.display(),
        config.output.format
    );
    if let Some(max) = config.max_pages {
        tracing::info!("Page limit: {}", max);
    }

    match run_crawl(config.clone()).await {
        Ok(report) => {
            print_report(&report, &config);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles `convert`: rebuilds CSV or Anki output from a digest
fn handle_convert(
    input: &std::path::Path,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match convert_archive(input, format) {
        Ok(path) => {
            println!("✓ Converted to: {}", path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Conversion failed: {}", e);
            Err(e.into())
        }
    }
}
