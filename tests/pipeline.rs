//! End-to-end rendering pipeline: mock feed server → session → HTML
//! fragments, covering tab rendering, pagination, search, and error paths.

use newsdeck::config::{Config, TabConfig};
use newsdeck::session::{RenderError, Session};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A feed of `count` imageless articles with descending scores.
fn feed_body(count: usize) -> String {
    let articles: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": format!("art-{i}"),
                "title": format!("Article number {i}"),
                "summary": format!("Summary for article {i} about marketing."),
                "source": "Test Wire",
                "url": format!("https://example.com/{i}"),
                "tags": ["marketing"],
                "published": "2024-05-01T12:00:00+00:00",
                "relevance_score": 100.0 - i as f64,
                "source_category": "marketing",
            })
        })
        .collect();
    serde_json::to_string(&articles).unwrap()
}

fn config_for(server: &MockServer) -> Config {
    Config {
        feed_base_url: server.uri(),
        tabs: vec![
            TabConfig {
                id: "main".into(),
                label: "Today".into(),
                feed: "main-feed.json".into(),
            },
            TabConfig {
                id: "adobe".into(),
                label: "Adobe".into(),
                feed: "vendor-adobe.json".into(),
            },
        ],
        ..Config::default()
    }
}

async fn mount_feed(server: &MockServer, feed_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/{feed_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn render_tab_composes_all_sections() {
    let server = MockServer::start().await;
    // 3 featured + 9 fresh + 30 remaining
    mount_feed(&server, "main-feed.json", feed_body(42)).await;

    let mut session = Session::new(config_for(&server)).unwrap();
    let html = session.render_tab("main").await.unwrap();

    // Main tab gets the date-themed header
    assert!(html.contains("tab-header"));
    // Top-scored article is featured
    assert!(html.contains("card--featured"));
    assert!(html.contains("Article number 0"));
    // Fresh section present
    assert!(html.contains("class=\"fresh\""));
    assert!(html.contains("Article number 3"));
    // First page of remaining is revealed, with a load-more control
    assert!(html.contains("Article number 12"));
    assert!(html.contains("Article number 23"));
    assert!(!html.contains("Article number 24"));
    assert!(html.contains("load-more"));
}

#[tokio::test]
async fn non_main_tab_has_no_date_header() {
    let server = MockServer::start().await;
    mount_feed(&server, "vendor-adobe.json", feed_body(4)).await;

    let mut session = Session::new(config_for(&server)).unwrap();
    let html = session.render_tab("adobe").await.unwrap();
    assert!(!html.contains("tab-header"));
}

#[tokio::test]
async fn load_more_pages_through_remaining() {
    let server = MockServer::start().await;
    mount_feed(&server, "main-feed.json", feed_body(42)).await;

    let mut session = Session::new(config_for(&server)).unwrap();
    session.render_tab("main").await.unwrap();

    // Remaining = 30, page size 12: 12 revealed at render, then 12, then 6
    let second = session.load_more("main").unwrap();
    assert!(second.markup.contains("Article number 24"));
    assert!(second.markup.contains("Article number 35"));
    assert!(second.has_more);

    let third = session.load_more("main").unwrap();
    assert!(third.markup.contains("Article number 36"));
    assert!(third.markup.contains("Article number 41"));
    assert!(!third.has_more);

    // Exhausted: empty, idempotent
    let done = session.load_more("main").unwrap();
    assert!(done.markup.is_empty());
    assert!(!done.has_more);
}

#[tokio::test]
async fn short_feed_needs_no_load_more() {
    let server = MockServer::start().await;
    mount_feed(&server, "main-feed.json", feed_body(14)).await;

    let mut session = Session::new(config_for(&server)).unwrap();
    let html = session.render_tab("main").await.unwrap();
    // 3 featured + 9 fresh + 2 remaining, all revealed
    assert!(html.contains("Article number 13"));
    assert!(!html.contains("load-more"));
}

#[tokio::test]
async fn search_filters_and_restores() {
    let server = MockServer::start().await;
    let articles = json!([
        {"id": "1", "title": "AI in Marketing", "summary": "Automation trends.",
         "source": "Wire", "relevance_score": 60},
        {"id": "2", "title": "Retail report", "summary": "Holiday numbers.",
         "source": "Wire", "relevance_score": 80},
    ]);
    mount_feed(&server, "main-feed.json", articles.to_string()).await;

    let mut session = Session::new(config_for(&server)).unwrap();
    let original = session.render_tab("main").await.unwrap();

    let results = session.search_tab("main", "ai marketing").unwrap();
    assert!(results.contains("1 article matching"));
    assert!(results.contains("AI in Marketing"));
    assert!(!results.contains("Retail report"));

    let none = session.search_tab("main", "blockchain").unwrap();
    assert!(none.contains("search-results--empty"));

    // Sub-length query means "no search": the original view comes back
    let restored = session.search_tab("main", "a").unwrap();
    assert_eq!(restored, original);
}

#[tokio::test]
async fn tie_on_score_broken_by_recency() {
    let server = MockServer::start().await;
    let articles = json!([
        {"id": "2", "title": "Older ninety", "published": "2024-05-01T11:00:00+00:00",
         "relevance_score": 90},
        {"id": "3", "title": "Fifty", "published": "2024-05-01T12:00:00+00:00",
         "relevance_score": 50},
        {"id": "1", "title": "Newer ninety", "published": "2024-05-01T12:00:00+00:00",
         "relevance_score": 90},
    ]);
    mount_feed(&server, "main-feed.json", articles.to_string()).await;

    let mut session = Session::new(config_for(&server)).unwrap();
    let html = session.render_tab("main").await.unwrap();

    let newer = html.find("Newer ninety").unwrap();
    let older = html.find("Older ninety").unwrap();
    let fifty = html.find("Fifty").unwrap();
    assert!(newer < older && older < fifty);
}

#[tokio::test]
async fn unknown_tab_is_an_error() {
    let server = MockServer::start().await;
    let mut session = Session::new(config_for(&server)).unwrap();
    match session.render_tab("ghost").await {
        Err(RenderError::UnknownTab(id)) => assert_eq!(id, "ghost"),
        other => panic!("expected UnknownTab, got {other:?}"),
    }
}

#[tokio::test]
async fn load_more_before_render_is_an_error() {
    let server = MockServer::start().await;
    let mut session = Session::new(config_for(&server)).unwrap();
    assert!(matches!(
        session.load_more("main"),
        Err(RenderError::TabNotLoaded(_))
    ));
    assert!(matches!(
        session.search_tab("main", "query"),
        Err(RenderError::TabNotLoaded(_))
    ));
}

#[tokio::test]
async fn fetch_failure_propagates_for_retry_affordance() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let mut session = Session::new(config_for(&server)).unwrap();
    match session.render_tab("main").await {
        Err(RenderError::Fetch(_)) => {}
        other => panic!("expected Fetch error, got {other:?}"),
    }
    // The tab never loaded, so its state was not clobbered
    assert!(session.rendered_markup("main").is_none());
}

#[tokio::test]
async fn refresh_refetches_on_next_render() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/main-feed.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed_body(5)))
        .expect(2)
        .mount(&server)
        .await;

    let mut session = Session::new(config_for(&server)).unwrap();
    session.render_tab("main").await.unwrap();
    // Within TTL a re-render would normally hit the cache...
    session.refresh();
    // ...but refresh cleared it, forcing a second HTTP request
    session.render_tab("main").await.unwrap();
}

#[tokio::test]
async fn rendered_tabs_are_independent() {
    let server = MockServer::start().await;
    mount_feed(&server, "main-feed.json", feed_body(42)).await;
    mount_feed(&server, "vendor-adobe.json", feed_body(20)).await;

    let mut session = Session::new(config_for(&server)).unwrap();
    session.render_tab("main").await.unwrap();
    session.render_tab("adobe").await.unwrap();

    // Advancing main's cursor leaves adobe's untouched
    session.load_more("main").unwrap();
    let adobe = session.load_more("adobe").unwrap();
    // adobe: 20 articles → 8 remaining, all revealed at render
    assert!(adobe.markup.is_empty());
    assert!(!adobe.has_more);

    assert!(session.rendered_markup("main").is_some());
    assert!(session.rendered_markup("adobe").is_some());
}
