use super::SectionRenderer;
use crate::models::Article;
use crate::page::{PageContext, MOUNT_NEWS};
use crate::utils::{article_link, html_escape};

impl SectionRenderer {
    /// Render the news grid: one link card per article with image, title and
    /// excerpt.
    pub fn render_news<P>(&self, page: &mut P, articles: &[Article])
    where
        P: PageContext + ?Sized,
    {
        let Some(mount) = page.mount_point(MOUNT_NEWS) else {
            return;
        };
        mount.set_html(self.news_markup(articles));
    }

    fn news_markup(&self, articles: &[Article]) -> String {
        let mut cards = String::new();
        for article in articles {
            let title = html_escape(&article.title);
            cards.push_str(&format!(
                r#"<a href="{}" class="news-item"><img src="{}" alt="{}"><h4>{}</h4><p>{}</p></a>"#,
                html_escape(&article_link(self.article_page(), &article.slug)),
                html_escape(&article.image),
                title,
                title,
                html_escape(&article.excerpt),
            ));
        }
        format!(r#"<div class="news-grid">{}</div>"#, cards)
    }
}
