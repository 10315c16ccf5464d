//! Data models for the site's JSON resources.

mod article;
mod event;

pub use article::{Article, ArticleCollection, TrustedHtml};
pub use event::{Event, EventCollection};
