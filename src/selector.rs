//! Deriving page sections from the ordered article list.
//!
//! The first article is the featured one; everything after it is the pool
//! for the news grid and photo stories.

use crate::models::Article;

/// Number of articles shown as photo stories.
pub const PHOTO_STORY_COUNT: usize = 2;

/// Split off the featured article. The rest keeps its order.
pub fn split_featured(articles: &[Article]) -> (Option<&Article>, &[Article]) {
    match articles.split_first() {
        Some((hero, rest)) => (Some(hero), rest),
        None => (None, &[]),
    }
}

/// The leading articles of `rest` used for photo stories.
pub fn take_for_photo_stories(rest: &[Article]) -> &[Article] {
    &rest[..rest.len().min(PHOTO_STORY_COUNT)]
}

/// First article whose slug matches exactly. Absent and empty slugs match
/// nothing.
pub fn find_by_slug<'a>(articles: &'a [Article], slug: Option<&str>) -> Option<&'a Article> {
    let slug = slug.filter(|s| !s.is_empty())?;
    articles.iter().find(|article| article.slug == slug)
}
