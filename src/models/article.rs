//! Article model and the `articles.json` envelope.
//!
//! Collection order is meaningful: the first article is the featured one.

use serde::{Deserialize, Deserializer, Serialize};

/// Pre-sanitized article body markup.
///
/// Embedded into pages verbatim. Every other text field of an article is
/// escaped before rendering; only values of this type bypass escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier used in links and lookups.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub author: String,
    /// Neighborhood the story covers. Empty strings are read as absent.
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub neighborhood: Option<String>,
    /// Publication timestamp as written in the source data.
    #[serde(default)]
    pub date: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Rendered article body.
    #[serde(default)]
    pub html: TrustedHtml,
}

impl Article {
    /// Create an article with the required fields; the rest start empty.
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            excerpt: String::new(),
            author: String::new(),
            neighborhood: None,
            date: String::new(),
            image: String::new(),
            html: TrustedHtml::default(),
        }
    }
}

/// The `articles.json` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleCollection {
    #[serde(default)]
    pub articles: Vec<Article>,
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
