use super::SectionRenderer;
use crate::models::Article;
use crate::page::{PageContext, MOUNT_ARTICLE};
use crate::utils::html_escape;

/// Shown when no article matches the requested slug.
pub const ARTICLE_NOT_FOUND: &str = "<p>Article not found.</p>";

impl SectionRenderer {
    /// Render the article page body, or the not-found message.
    ///
    /// The article's `html` is trusted markup and is embedded verbatim.
    pub fn render_article_detail<P>(&self, page: &mut P, article: Option<&Article>)
    where
        P: PageContext + ?Sized,
    {
        let Some(mount) = page.mount_point(MOUNT_ARTICLE) else {
            return;
        };
        match article {
            Some(article) => mount.set_html(self.article_markup(article)),
            None => mount.set_html(ARTICLE_NOT_FOUND),
        }
    }

    fn article_markup(&self, article: &Article) -> String {
        let mut meta = format!(
            "{} — {}",
            html_escape(&self.dates().format_date(&article.date)),
            html_escape(&article.author)
        );
        if let Some(neighborhood) = &article.neighborhood {
            meta.push_str(" — ");
            meta.push_str(&html_escape(neighborhood));
        }

        format!(
            r#"<h1 class="article-title">{}</h1><p class="article-meta">{}</p><div class="article-body">{}</div>"#,
            html_escape(&article.title),
            meta,
            article.html.as_str()
        )
    }
}
