//! HTTP Fetch Tests
//!
//! Serves site data from a local axum server and loads it through
//! `HttpFetcher`.

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use chrono::Locale;
use newsfront::controller::FlowOutcome;
use newsfront::fetch::{fetch_json, fetch_resource};
use newsfront::models::ArticleCollection;
use newsfront::page::{MemoryPage, MOUNT_ARTICLE, MOUNT_EVENTS, MOUNT_HERO};
use newsfront::utils::{DateFormatter, DisplayZone};
use newsfront::{FetchError, HttpFetcher, PageController, ResourceFetcher, SectionRenderer};
use tokio::net::TcpListener;
use url::Url;

const ARTICLES: &str = r#"{"articles":[
  {"slug":"a1","title":"Ferry Returns","date":"2024-03-15","author":"Jordan Park","html":"<p>Back on the water.</p>"},
  {"slug":"b2","title":"Library Expands","date":"2024-03-14"}
]}"#;

const EVENTS: &str = r#"{"events":[{"title":"Harvest Market","date":"2024-04-20"}]}"#;

fn site() -> Router {
    Router::new()
        .route(
            "/site/data/articles.json",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], ARTICLES) }),
        )
        .route(
            "/site/data/events.json",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], EVENTS) }),
        )
        .route("/site/data/broken.json", get(|| async { "{\"articles\": [" }))
        .route(
            "/site/data/down.json",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        )
}

/// Start the fixture server and return the site's base URL.
async fn serve(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    // No trailing slash: the fetcher treats the base as a directory.
    Url::parse(&format!("http://{}/site", addr)).unwrap()
}

fn fetcher(base: Url) -> HttpFetcher {
    HttpFetcher::new(base, "newsfront-test").unwrap()
}

fn controller(base: Url) -> PageController {
    let renderer = SectionRenderer::new(
        DateFormatter::new(Locale::en_US, DisplayZone::Named(chrono_tz::UTC)),
        "article.html",
    );
    PageController::new(Arc::new(fetcher(base)), renderer)
}

#[tokio::test]
async fn test_fetch_articles() {
    let fetcher = fetcher(serve(site()).await);
    let collection: ArticleCollection = fetch_json(&fetcher, "data/articles.json").await.unwrap();
    assert_eq!(collection.articles.len(), 2);
    assert_eq!(collection.articles[0].slug, "a1");
    assert_eq!(collection.articles[1].author, "");
}

#[tokio::test]
async fn test_fetch_resource_value() {
    let fetcher = fetcher(serve(site()).await);
    let value = fetch_resource(&fetcher, "/data/events.json").await.unwrap();
    assert_eq!(value["events"][0]["title"], "Harvest Market");
}

#[tokio::test]
async fn test_missing_resource_is_status_error() {
    let fetcher = fetcher(serve(site()).await);
    let err = fetch_resource(&fetcher, "data/nope.json").await.unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus { status: 404, .. }));
    assert_eq!(err.path(), "data/nope.json");
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let fetcher = fetcher(serve(site()).await);
    let err = fetch_resource(&fetcher, "data/down.json").await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let fetcher = fetcher(serve(site()).await);
    let err = fetch_json::<ArticleCollection, _>(&fetcher, "data/broken.json")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::ParseError { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = Url::parse(&format!("http://{}/", addr)).unwrap();
    let err = fetch_resource(&fetcher(base), "data/articles.json")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_describe_is_base_url() {
    let base = serve(site()).await;
    let fetcher = fetcher(base.clone());
    assert_eq!(fetcher.describe(), format!("{}/", base));
}

#[tokio::test]
async fn test_home_and_article_over_http() {
    let controller = controller(serve(site()).await);

    let mut home = MemoryPage::new()
        .with_mount(MOUNT_HERO)
        .with_mount(MOUNT_EVENTS);
    let report = controller.load(&mut home).await;
    assert_eq!(report.home, Some(FlowOutcome::Rendered));
    assert_eq!(home.html(MOUNT_HERO), Some("<h2>Ferry Returns</h2>"));
    assert!(home
        .html(MOUNT_EVENTS)
        .unwrap()
        .contains("<li>Harvest Market — "));

    let mut article = MemoryPage::new()
        .with_mount(MOUNT_ARTICLE)
        .with_query("slug=a1");
    let report = controller.load(&mut article).await;
    assert_eq!(report.article, Some(FlowOutcome::Rendered));
    assert!(article
        .html(MOUNT_ARTICLE)
        .unwrap()
        .contains("<p>Back on the water.</p>"));
}
