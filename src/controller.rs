//! Page controller: picks the flows a page needs and runs them.
//!
//! A page with a `hero` mount point gets the home flow; a page with an
//! `article-content` mount point gets the article flow. Both can run in the
//! same load. Fetch failures are logged at the flow boundary and never reach
//! the caller; the page simply keeps its initial content.

use std::sync::Arc;

use crate::fetch::{fetch_json, FetchError, ResourceFetcher};
use crate::models::{Article, ArticleCollection, EventCollection};
use crate::page::{PageContext, MOUNT_ARTICLE, MOUNT_HERO};
use crate::render::SectionRenderer;
use crate::selector::{find_by_slug, split_featured, take_for_photo_stories};

/// Query parameter naming the article to show.
pub const SLUG_PARAM: &str = "slug";

/// Default path of the articles resource.
pub const DEFAULT_ARTICLES_PATH: &str = "data/articles.json";
/// Default path of the events resource.
pub const DEFAULT_EVENTS_PATH: &str = "data/events.json";

/// Relative paths of the two data resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub articles: String,
    pub events: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            articles: DEFAULT_ARTICLES_PATH.to_string(),
            events: DEFAULT_EVENTS_PATH.to_string(),
        }
    }
}

/// How a flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Data loaded and sections rendered.
    Rendered,
    /// Articles loaded but none matched the slug; the not-found message was
    /// rendered.
    NotFound,
    /// A fetch failed; nothing was rendered.
    Failed,
}

/// Which flows ran during a page load and how they ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub home: Option<FlowOutcome>,
    pub article: Option<FlowOutcome>,
}

impl LoadReport {
    /// Whether any flow that ran failed to load its data.
    pub fn has_failures(&self) -> bool {
        self.home == Some(FlowOutcome::Failed) || self.article == Some(FlowOutcome::Failed)
    }
}

/// Sequences fetch, select and render for a page.
#[derive(Clone)]
pub struct PageController {
    fetcher: Arc<dyn ResourceFetcher>,
    renderer: SectionRenderer,
    paths: DataPaths,
}

impl PageController {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, renderer: SectionRenderer) -> Self {
        Self {
            fetcher,
            renderer,
            paths: DataPaths::default(),
        }
    }

    /// Use non-default resource paths.
    pub fn with_paths(mut self, paths: DataPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Run every flow the page has mount points for.
    ///
    /// The flows fetch concurrently; rendering happens afterwards, one flow
    /// at a time.
    pub async fn load<P>(&self, page: &mut P) -> LoadReport
    where
        P: PageContext + ?Sized,
    {
        let run_home = page.has_mount_point(MOUNT_HERO);
        let run_article = page.has_mount_point(MOUNT_ARTICLE);
        tracing::debug!("Page load: home={} article={}", run_home, run_article);

        let (home, article) = tokio::join!(
            async {
                if run_home {
                    Some(self.fetch_home().await)
                } else {
                    None
                }
            },
            async {
                if run_article {
                    Some(self.fetch_articles().await)
                } else {
                    None
                }
            },
        );

        LoadReport {
            home: home.map(|result| self.finish_home(page, result)),
            article: article.map(|result| self.finish_article(page, result)),
        }
    }

    /// Run the home flow regardless of which mount points exist.
    pub async fn load_home<P>(&self, page: &mut P) -> FlowOutcome
    where
        P: PageContext + ?Sized,
    {
        let result = self.fetch_home().await;
        self.finish_home(page, result)
    }

    /// Run the article flow regardless of which mount points exist.
    pub async fn load_article<P>(&self, page: &mut P) -> FlowOutcome
    where
        P: PageContext + ?Sized,
    {
        let result = self.fetch_articles().await;
        self.finish_article(page, result)
    }

    /// Both resources, joined fail-fast: the first error wins.
    async fn fetch_home(&self) -> Result<(ArticleCollection, EventCollection), FetchError> {
        tokio::try_join!(
            fetch_json::<ArticleCollection, _>(&*self.fetcher, &self.paths.articles),
            fetch_json::<EventCollection, _>(&*self.fetcher, &self.paths.events),
        )
    }

    async fn fetch_articles(&self) -> Result<ArticleCollection, FetchError> {
        fetch_json(&*self.fetcher, &self.paths.articles).await
    }

    fn finish_home<P>(
        &self,
        page: &mut P,
        result: Result<(ArticleCollection, EventCollection), FetchError>,
    ) -> FlowOutcome
    where
        P: PageContext + ?Sized,
    {
        let (articles, events) = match result {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Failed to load home page: {}", e);
                return FlowOutcome::Failed;
            }
        };

        let articles: Vec<Article> = articles.articles;
        if !articles.is_empty() {
            let (hero, rest) = split_featured(&articles);
            self.renderer.render_hero(page, hero);
            self.renderer.render_news(page, rest);
            self.renderer
                .render_photo_stories(page, take_for_photo_stories(rest));
        }
        self.renderer.render_events(page, &events.events);

        tracing::info!(
            "Rendered home page: {} articles, {} events",
            articles.len(),
            events.events.len()
        );
        FlowOutcome::Rendered
    }

    fn finish_article<P>(
        &self,
        page: &mut P,
        result: Result<ArticleCollection, FetchError>,
    ) -> FlowOutcome
    where
        P: PageContext + ?Sized,
    {
        let collection = match result {
            Ok(collection) => collection,
            Err(e) => {
                tracing::error!("Failed to load article page: {}", e);
                return FlowOutcome::Failed;
            }
        };

        let slug = page.query_param(SLUG_PARAM);
        let article = find_by_slug(&collection.articles, slug.as_deref());
        self.renderer.render_article_detail(page, article);

        match article {
            Some(found) => {
                tracing::info!("Rendered article {}", found.slug);
                FlowOutcome::Rendered
            }
            None => {
                tracing::info!("No article for slug {:?}", slug);
                FlowOutcome::NotFound
            }
        }
    }
}
