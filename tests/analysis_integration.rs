use std::time::Duration;

use seocheck::analysis::{Analyzer, BatchSummary};
use seocheck::config::Config;
use seocheck::probe::BrokenReason;
use seocheck::score;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn analyzer() -> Analyzer {
    let config = Config::default()
        .with_batch_delay(Duration::ZERO)
        .with_probe_timeout(Duration::from_secs(2));
    Analyzer::new(config).unwrap()
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("Content-Type", "text/html; charset=utf-8")
}

const LINKED_PAGE: &str = r##"<!DOCTYPE html>
<html>
  <head>
    <title>Field notes on a small analyzer test</title>
    <link rel="canonical" href="/page">
    <meta property="og:title" content="Field notes">
  </head>
  <body>
    <h1>Field notes</h1>
    <p>Short body.</p>
    <a href="/ok">Fine</a>
    <a href="/missing">Gone</a>
    <a href="/ok#again">Fine again</a>
    <a href="#top">Top</a>
    <a href="http://127.0.0.1:1/unreachable">Elsewhere</a>
  </body>
</html>"##;

#[tokio::test]
async fn test_analyze_page_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html_page(LINKED_PAGE))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /\n"))
        .mount(&mock_server)
        .await;
    // no sitemap mounted: wiremock answers 404

    let url = format!("{}/page", mock_server.uri());
    let result = analyzer().analyze_url(&url).await;

    assert!(result.analysis_successful);
    assert!(result.error.is_none());
    assert_eq!(result.url, url);

    let page = result.page().unwrap();
    assert_eq!(page.status_code, 200);
    assert_eq!(page.final_url, url);
    assert!(page.load_time_seconds >= 0.0);

    let signals = &page.signals;
    assert_eq!(signals.title.title_length, 36);
    assert!(signals.title.title_optimal);
    assert!(signals.canonical.canonical_exists);
    assert!(signals.headings.h1_optimal);
    assert_eq!(signals.links.total_link_tags, 4);
    assert_eq!(
        signals.links.internal_links,
        vec![
            format!("{}/ok", mock_server.uri()),
            format!("{}/missing", mock_server.uri())
        ]
    );
    assert_eq!(
        signals.links.external_links,
        vec!["http://127.0.0.1:1/unreachable"]
    );

    // probed in order: /ok, /missing, then the external link
    let health = &page.link_health;
    assert_eq!(health.checked_links_count, 3);
    assert_eq!(health.broken_links_count, 2);
    assert_eq!(health.broken_links[0].url, format!("{}/missing", mock_server.uri()));
    assert_eq!(
        health.broken_links[0].reason,
        BrokenReason::Status { status_code: 404 }
    );
    assert_eq!(health.broken_links[1].url, "http://127.0.0.1:1/unreachable");
    assert!(matches!(
        health.broken_links[1].reason,
        BrokenReason::Error { .. }
    ));

    assert!(page.site_files.robots_txt_exists);
    assert!(!page.site_files.sitemap_xml_exists);
    assert_eq!(
        page.site_files.robots_txt_url,
        format!("{}/robots.txt", mock_server.uri())
    );

    let scores = score(&result).unwrap();
    assert_eq!(scores.title, 100.0);
    assert_eq!(scores.meta_description, 0.0);
    assert_eq!(scores.content, 50.0);
    // robots + canonical, no sitemap
    assert!((scores.technical - 200.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_http_error_yields_failed_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let result = analyzer().analyze_url(&url).await;

    assert!(!result.analysis_successful);
    assert!(result.page().is_none());
    assert!(result.error.as_deref().unwrap().contains("404"));
    assert!(score(&result).is_none());

    let value = serde_json::to_value(&result).unwrap();
    assert!(value.get("title").is_none());
    assert!(value.get("statusCode").is_none());
}

#[tokio::test]
async fn test_invalid_url_yields_failed_result() {
    let result = analyzer().analyze_url("example.com/no-scheme").await;

    assert!(!result.analysis_successful);
    assert_eq!(result.url, "example.com/no-scheme");
    assert!(result.error.as_deref().unwrap().contains("invalid url"));
}

#[tokio::test]
async fn test_redirect_keeps_input_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html_page("<html><head><title>Moved</title></head></html>"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/old", mock_server.uri());
    let result = analyzer().analyze_url(&url).await;

    let page = result.page().unwrap();
    assert_eq!(result.url, url);
    assert_eq!(page.final_url, format!("{}/new", mock_server.uri()));
    assert_eq!(page.signals.title.title, "Moved");
}

#[tokio::test]
async fn test_link_sample_is_bounded() {
    let mock_server = MockServer::start().await;

    let anchors: String = (0..25)
        .map(|i| format!(r#"<a href="/item/{i}">Item {i}</a>"#))
        .collect();
    let body = format!("<html><body>{anchors}</body></html>");

    Mock::given(method("GET"))
        .and(path("/catalog"))
        .respond_with(html_page(&body))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(20)
        .mount(&mock_server)
        .await;

    let url = format!("{}/catalog", mock_server.uri());
    let result = analyzer().analyze_url(&url).await;

    let page = result.page().unwrap();
    assert_eq!(page.signals.links.internal_links_count, 25);
    assert_eq!(page.link_health.checked_links_count, 20);
    assert_eq!(page.link_health.broken_links_count, 0);
}

#[tokio::test]
async fn test_batch_preserves_order_and_survives_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(html_page("<html><head><title>First</title></head></html>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/third"))
        .respond_with(html_page("<html><head><title>Third</title></head></html>"))
        .mount(&mock_server)
        .await;

    let urls = vec![
        format!("{}/first", mock_server.uri()),
        format!("{}/broken", mock_server.uri()),
        format!("{}/third", mock_server.uri()),
    ];
    let results = analyzer().analyze_urls(&urls).await;

    let returned: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(returned, urls.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(
        results
            .iter()
            .map(|r| r.analysis_successful)
            .collect::<Vec<_>>(),
        vec![true, false, true]
    );
    assert_eq!(results[2].signals().unwrap().title.title, "Third");

    let summary = BatchSummary::from_results(results);
    assert_eq!(summary.total_urls, 3);
    assert_eq!(summary.successful_analyses, 2);
    assert_eq!(summary.failed_analyses, 1);
}

#[tokio::test]
async fn test_empty_batch() {
    let urls: Vec<String> = Vec::new();
    let results = analyzer().analyze_urls(&urls).await;
    assert!(results.is_empty());
}
