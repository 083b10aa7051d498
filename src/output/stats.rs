//! End-of-run report printing

use crate::config::CrawlConfig;
use crate::output::traits::CrawlReport;
use crate::text::{char_len, format_bytes};

/// Prints the run summary to stdout
pub fn print_report(report: &CrawlReport, config: &CrawlConfig) {
    println!("\n=== Crawl Report: {} ===\n", config.name);

    println!("Pages:");
    println!("  Succeeded: {}", report.success_count);
    println!("  Failed: {}", report.fail_count);

    let total_chars: usize = report.pages.iter().map(|p| char_len(&p.content)).sum();
    let total_bytes: usize = report.pages.iter().map(|p| p.content.len()).sum();
    println!("  Extracted text: {} chars ({})", total_chars, format_bytes(total_bytes));

    let key_points: usize = report.pages.iter().map(|p| p.key_points.len()).sum();
    let qa_pairs: usize = report.pages.iter().map(|p| p.qa.len()).sum();
    if config.generate_summary {
        println!("  Key points: {}", key_points);
    }
    if config.generate_qa {
        println!("  Q&A pairs: {}", qa_pairs);
    }

    if !report.artifacts.is_empty() {
        println!("\nArtifacts:");
        for artifact in &report.artifacts {
            println!("  {}: {}", artifact.kind, artifact.path.display());
        }
    }

    println!(
        "\nPer-page files: {} in {}",
        report.page_files.len(),
        config.output.content_dir().display()
    );
}
