//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small documentation site and run the
//! full crawl cycle end-to-end through the HTTP renderer.

use doc_scraper::config::{resolve_config, CrawlOverrides, PresetFile};
use doc_scraper::output::{convert_archive, ArtifactKind};
use doc_scraper::{run_crawl, CrawlConfig, OutputFormat, ScrapeError};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, output_dir: &Path) -> CrawlConfig {
    let mut config = CrawlConfig {
        name: "Mock Docs".to_string(),
        base_url: base_url.to_string(),
        index_path: "/guide/".to_string(),
        content_selector: ".doc-content".to_string(),
        link_selector: ".sidebar-nav a".to_string(),
        fallback_selectors: vec!["article".to_string()],
        wait_time: Duration::ZERO,
        request_delay: Duration::from_millis(10),
        timeout: Duration::from_secs(5),
        ..Default::default()
    };
    config.output.output_dir = output_dir.to_path_buf();
    config
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Index with three chapters; the second one is broken on the server
async fn mount_site(server: &MockServer) {
    mount_page(
        server,
        "/guide/",
        html_page(
            "Guide",
            r#"<aside class="sidebar-nav">
                <a href="/guide/introduction">Introduction</a>
                <a href="/guide/broken">Broken Chapter</a>
                <a href="/guide/components">Components
                   Basics</a>
                <a href="/guide/manual.pdf">Manual</a>
                <a href="/guide/introduction#setup">Setup</a>
            </aside>"#,
        ),
    )
    .await;

    mount_page(
        server,
        "/guide/introduction",
        html_page(
            "Introduction | Mock Docs",
            r#"<nav>Home / Guide</nav>
            <div class="doc-content">
                <h1>Introduction</h1>
                <p>Vue is a framework for building user interfaces.
                You can learn how the reactivity system tracks changes.</p>
                <p>Install: npm create vue@latest</p>
                <ul><li>Declarative rendering</li><li>Reactivity</li></ul>
                <div class="toc">On this page</div>
            </div>"#,
        ),
    )
    .await;

    mount_page(
        server,
        "/guide/broken",
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    mount_page(
        server,
        "/guide/components",
        html_page(
            "Components",
            r#"<article>
                <h2>Components Basics</h2>
                <p>Components allow us to split the UI into independent and reusable pieces.</p>
                <script>console.log("ignored")</script>
            </article>"#,
        ),
    )
    .await;
}

#[tokio::test]
async fn test_full_crawl_isolates_failed_page() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let out = TempDir::new().unwrap();
    let report = run_crawl(create_test_config(&server.uri(), out.path()))
        .await
        .expect("crawl should succeed");

    assert_eq!(report.success_count, 2);
    assert_eq!(report.fail_count, 1);

    let indices: Vec<_> = report.pages.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![1, 3]);
    assert_eq!(report.pages[1].title, "Components Basics");
    assert_eq!(
        report.pages[0].url,
        format!("{}/guide/introduction", server.uri())
    );

    // Chrome stripped, fallback selector used for the second page
    assert!(!report.pages[0].content.contains("Home / Guide"));
    assert!(!report.pages[0].content.contains("On this page"));
    assert!(report.pages[1].content.starts_with("Components Basics"));
    assert!(!report.pages[1].content.contains("console.log"));

    // Short label lines become key points
    assert_eq!(
        report.pages[0].key_points,
        vec!["Install: npm create vue@latest".to_string()]
    );
}

#[tokio::test]
async fn test_per_page_files_and_digest() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let out = TempDir::new().unwrap();
    let report = run_crawl(create_test_config(&server.uri(), out.path()))
        .await
        .unwrap();

    let content_dir = out.path().join("content");
    assert!(content_dir.join("001-Introduction.md").exists());
    assert!(content_dir.join("003-Components_Basics.md").exists());
    assert_eq!(report.page_files.len(), 2);

    assert_eq!(report.artifacts.len(), 1);
    assert_eq!(report.artifacts[0].kind, ArtifactKind::Markdown);

    let digest = std::fs::read_to_string(out.path().join("combined.md")).unwrap();
    assert!(digest.starts_with("# Mock Docs\n"));
    assert!(digest.contains("> Pages: 3\n"));
    let intro = digest.find("## Introduction").unwrap();
    let comps = digest.find("## Components Basics").unwrap();
    assert!(intro < comps);
    assert!(!digest.contains("## Broken Chapter"));
}

#[tokio::test]
async fn test_all_formats_with_qa() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let out = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), out.path());
    config.output.format = OutputFormat::All;
    config.generate_qa = true;

    let report = run_crawl(config).await.unwrap();

    let kinds: Vec<_> = report.artifacts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ArtifactKind::Markdown,
            ArtifactKind::Csv,
            ArtifactKind::Anki,
            ArtifactKind::QaCsv,
            ArtifactKind::Json
        ]
    );
    assert_eq!(report.page_files.len(), report.success_count);

    let csv = std::fs::read_to_string(out.path().join("content.csv")).unwrap();
    assert_eq!(csv.lines().next(), Some("Index,Title,URL,Content Length,Key Points"));

    let qa = std::fs::read_to_string(out.path().join("qa-pairs.csv")).unwrap();
    assert!(qa.contains("\"What is Introduction?\""));
    assert!(qa.contains("how does this work"));

    let deck = std::fs::read_to_string(out.path().join("anki-import.txt")).unwrap();
    assert!(deck.starts_with("#separator:tab\n#html:true\n#tags column:3\n"));

    let json = std::fs::read_to_string(out.path().join("data.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);
    assert_eq!(records[1]["index"], 3);
}

#[tokio::test]
async fn test_unreachable_index_is_fatal() {
    let server = MockServer::start().await;
    mount_page(&server, "/guide/", ResponseTemplate::new(404)).await;

    let out = TempDir::new().unwrap();
    let result = run_crawl(create_test_config(&server.uri(), out.path())).await;

    assert!(matches!(result, Err(ScrapeError::IndexPage { .. })));
    assert!(!out.path().join("combined.md").exists());
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/guide/",
        html_page("Guide", r#"<div class="sidebar-nav"><a href="/guide/slow">Slow</a></div>"#),
    )
    .await;
    mount_page(
        &server,
        "/guide/slow",
        html_page("Slow", "<div class=\"doc-content\">Too late</div>")
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let out = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), out.path());
    config.timeout = Duration::from_millis(300);

    let report = run_crawl(config).await.unwrap();
    assert_eq!(report.success_count, 0);
    assert_eq!(report.fail_count, 1);
}

#[tokio::test]
async fn test_resolved_preset_and_convert() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let presets = doc_scraper::config::parse_presets(
        r##"
        [presets.mock]
        name = "Mock Docs"
        url = "http://unused.invalid"
        index-path = "/guide/"
        content-selector = ".doc-content"
        link-selector = ".sidebar-nav a"
        fallback-selectors = ["article"]
        exclude-patterns = ["#", ".pdf"]
        wait-time = 0
        timeout = 5000
        "##,
    )
    .unwrap();

    let out = TempDir::new().unwrap();
    let overrides = CrawlOverrides {
        url: Some(server.uri()),
        output_dir: Some(out.path().to_path_buf()),
        max_pages: Some(1),
        ..Default::default()
    };
    let config = resolve_config(&presets, "mock", overrides).unwrap();

    let report = run_crawl(config).await.unwrap();
    assert_eq!(report.success_count, 1);
    assert_eq!(report.fail_count, 0);

    let digest = out.path().join("combined.md");
    let csv_path = convert_archive(&digest, "csv").unwrap();
    let csv = std::fs::read_to_string(csv_path).unwrap();
    let rows: Vec<_> = csv.lines().collect();
    assert_eq!(rows[0], "Title,Content Preview");
    assert_eq!(rows.len(), 2);
    assert!(rows[1].starts_with("\"Introduction\","));
}

#[test]
fn test_unknown_preset_is_rejected() {
    let presets = PresetFile::default();
    let result = resolve_config(&presets, "missing", CrawlOverrides::default());
    assert!(result.is_err());
}
