//! Links into the article page.

/// Build the link to an article page: `{page}?slug={percent-encoded slug}`.
pub fn article_link(page: &str, slug: &str) -> String {
    format!("{}?slug={}", page, urlencoding::encode(slug))
}
