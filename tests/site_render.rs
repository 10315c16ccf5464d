//! Site Render Tests
//!
//! Renders page shells from a site checked out on disk, the way the
//! `render` command does.

use std::path::Path;
use std::sync::Arc;

use chrono::Locale;
use newsfront::controller::{DataPaths, FlowOutcome};
use newsfront::fetch::FileFetcher;
use newsfront::page::HtmlPage;
use newsfront::utils::{DateFormatter, DisplayZone};
use newsfront::{PageController, SectionRenderer};
use scraper::{Html, Selector};
use serde_json::json;
use tempfile::TempDir;

const INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Riverside Gazette</title>
</head>
<body>
  <header><h1>Riverside Gazette</h1></header>
  <section id="hero"></section>
  <main>
    <section id="news"></section>
    <section id="photo-stories"><h3>Photo Stories</h3></section>
  </main>
  <aside id="events"></aside>
</body>
</html>
"#;

const ARTICLE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>Article</title></head>
<body>
  <a href="index.html">Back</a>
  <article id="article-content"><p class="loading">Loading…</p></article>
</body>
</html>
"#;

fn write_site(articles: &[(&str, &str)], events: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();

    let articles: Vec<_> = articles
        .iter()
        .map(|(slug, title)| {
            json!({
                "slug": slug,
                "title": title,
                "excerpt": format!("Excerpt for {}", title),
                "author": "Jordan Park",
                "neighborhood": "Old Town",
                "date": "2024-03-15T12:00:00Z",
                "image": format!("images/{}.jpg", slug),
                "html": format!("<p>{} body</p>", title),
            })
        })
        .collect();
    let events: Vec<_> = events
        .iter()
        .map(|title| json!({ "title": title, "date": "2024-04-20" }))
        .collect();

    std::fs::write(
        data.join("articles.json"),
        json!({ "articles": articles }).to_string(),
    )
    .unwrap();
    std::fs::write(data.join("events.json"), json!({ "events": events }).to_string()).unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
    std::fs::write(dir.path().join("article.html"), ARTICLE).unwrap();
    dir
}

fn controller(root: &Path) -> PageController {
    let renderer = SectionRenderer::new(
        DateFormatter::new(Locale::en_US, DisplayZone::Named(chrono_tz::UTC)),
        "article.html",
    );
    PageController::new(Arc::new(FileFetcher::new(root)), renderer)
}

fn select_attrs(html: &str, selector: &str, attr: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .filter_map(|el| el.value().attr(attr).map(str::to_string))
        .collect()
}

fn select_text(html: &str, selector: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect()
}

#[tokio::test]
async fn test_homepage_render() {
    let site = write_site(
        &[
            ("a1", "Ferry Returns"),
            ("b2", "Library Expands"),
            ("c3", "Mural Unveiled"),
            ("d4", "Bakery Wins Award"),
        ],
        &["Harvest Market"],
    );
    let mut page = HtmlPage::from_html(INDEX, "").unwrap();
    let report = controller(site.path()).load(&mut page).await;
    assert_eq!(report.home, Some(FlowOutcome::Rendered));
    assert_eq!(report.article, None);

    let html = page.to_html();
    assert_eq!(select_text(&html, "#hero h2"), ["Ferry Returns"]);
    assert_eq!(
        select_attrs(&html, "#news .news-grid a.news-item", "href"),
        [
            "article.html?slug=b2",
            "article.html?slug=c3",
            "article.html?slug=d4"
        ]
    );
    assert_eq!(
        select_attrs(&html, "#photo-stories a.photo-story", "href"),
        ["article.html?slug=b2", "article.html?slug=c3"]
    );
    assert_eq!(select_text(&html, "#photo-stories h3"), ["Photo Stories"]);
    assert_eq!(select_text(&html, "#events h3"), ["Whats Happening"]);

    let items = select_text(&html, "#events li");
    assert_eq!(items.len(), 1);
    assert!(items[0].starts_with("Harvest Market — "));
    assert!(items[0].contains("2024"));

    assert!(html.contains("<header><h1>Riverside Gazette</h1></header>"));
}

#[tokio::test]
async fn test_homepage_single_article() {
    let site = write_site(&[("a1", "Ferry Returns")], &[]);
    let mut page = HtmlPage::from_html(INDEX, "").unwrap();
    controller(site.path()).load(&mut page).await;

    let html = page.to_html();
    assert_eq!(select_text(&html, "#hero h2"), ["Ferry Returns"]);
    assert!(select_attrs(&html, "#news a", "href").is_empty());
    assert!(html.contains(r#"<section id="photo-stories"><h3>Photo Stories</h3></section>"#));
    assert!(select_text(&html, "#events li").is_empty());
    assert_eq!(select_text(&html, "#events h3"), ["Whats Happening"]);
}

#[tokio::test]
async fn test_article_page_render() {
    let site = write_site(&[("a1", "Ferry Returns"), ("b2", "Library Expands")], &[]);
    let mut page = HtmlPage::from_html(ARTICLE, "slug=b2").unwrap();
    let report = controller(site.path()).load(&mut page).await;
    assert_eq!(report.article, Some(FlowOutcome::Rendered));

    let html = page.to_html();
    assert_eq!(select_text(&html, "h1.article-title"), ["Library Expands"]);
    let meta = select_text(&html, "p.article-meta");
    assert!(meta[0].ends_with(" — Jordan Park — Old Town"));
    assert!(html.contains(r#"<div class="article-body"><p>Library Expands body</p></div>"#));
    assert!(!html.contains("Loading…"));
}

#[tokio::test]
async fn test_article_page_unknown_slug() {
    let site = write_site(&[("a1", "Ferry Returns")], &[]);
    let mut page = HtmlPage::from_html(ARTICLE, "slug=zzz").unwrap();
    let report = controller(site.path()).load(&mut page).await;
    assert_eq!(report.article, Some(FlowOutcome::NotFound));
    assert!(page
        .to_html()
        .contains(r#"<article id="article-content"><p>Article not found.</p></article>"#));
}

#[tokio::test]
async fn test_missing_data_leaves_pages_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let controller = controller(dir.path());

    let mut home = HtmlPage::from_html(INDEX, "").unwrap();
    let report = controller.load(&mut home).await;
    assert_eq!(report.home, Some(FlowOutcome::Failed));
    assert_eq!(home.to_html(), INDEX);

    let mut article = HtmlPage::from_html(ARTICLE, "slug=a1").unwrap();
    let report = controller.load(&mut article).await;
    assert_eq!(report.article, Some(FlowOutcome::Failed));
    assert_eq!(article.to_html(), ARTICLE);
}

#[tokio::test]
async fn test_events_missing_fails_whole_home_flow() {
    let site = write_site(&[("a1", "Ferry Returns")], &["Harvest Market"]);
    std::fs::remove_file(site.path().join("data/events.json")).unwrap();

    let mut page = HtmlPage::from_html(INDEX, "").unwrap();
    let report = controller(site.path()).load(&mut page).await;
    assert!(report.has_failures());
    assert!(page.modified_mounts().is_empty());
}

#[tokio::test]
async fn test_custom_data_paths() {
    let site = write_site(&[("a1", "Ferry Returns")], &[]);
    std::fs::rename(site.path().join("data"), site.path().join("feeds")).unwrap();

    let controller = controller(site.path()).with_paths(DataPaths {
        articles: "feeds/articles.json".to_string(),
        events: "feeds/events.json".to_string(),
    });
    let mut page = HtmlPage::from_html(INDEX, "").unwrap();
    let report = controller.load(&mut page).await;
    assert_eq!(report.home, Some(FlowOutcome::Rendered));
}
