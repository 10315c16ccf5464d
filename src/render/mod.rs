//! Section renderers.
//!
//! Each renderer looks up its mount point and, when the page has it,
//! replaces the content with markup built only from its input. A missing
//! mount point means the page doesn't have that section: nothing happens and
//! no error is raised.

mod article;
mod events;
mod hero;
mod news;
mod photo_stories;

pub use article::ARTICLE_NOT_FOUND;
pub use events::EVENTS_HEADING;
pub use photo_stories::PHOTO_STORIES_HEADING;

use crate::utils::DateFormatter;

/// Default target of article links.
pub const DEFAULT_ARTICLE_PAGE: &str = "article.html";

/// Renders page sections into mount points.
#[derive(Debug, Clone)]
pub struct SectionRenderer {
    dates: DateFormatter,
    article_page: String,
}

impl Default for SectionRenderer {
    fn default() -> Self {
        Self::new(DateFormatter::default(), DEFAULT_ARTICLE_PAGE)
    }
}

impl SectionRenderer {
    pub fn new(dates: DateFormatter, article_page: impl Into<String>) -> Self {
        Self {
            dates,
            article_page: article_page.into(),
        }
    }

    pub fn dates(&self) -> &DateFormatter {
        &self.dates
    }

    pub fn article_page(&self) -> &str {
        &self.article_page
    }
}
