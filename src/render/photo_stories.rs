use super::SectionRenderer;
use crate::models::Article;
use crate::page::{PageContext, MOUNT_PHOTO_STORIES};
use crate::utils::{article_link, html_escape};

/// Heading of the photo stories section.
pub const PHOTO_STORIES_HEADING: &str = "Photo Stories";

impl SectionRenderer {
    /// Render photo stories: a heading and one image card per article.
    ///
    /// With no articles the mount point keeps whatever it held before,
    /// including any static heading in the page.
    pub fn render_photo_stories<P>(&self, page: &mut P, articles: &[Article])
    where
        P: PageContext + ?Sized,
    {
        if articles.is_empty() {
            return;
        }
        let Some(mount) = page.mount_point(MOUNT_PHOTO_STORIES) else {
            return;
        };

        let mut html = format!("<h3>{}</h3>", PHOTO_STORIES_HEADING);
        for article in articles {
            let title = html_escape(&article.title);
            html.push_str(&format!(
                r#"<a href="{}" class="photo-story"><img src="{}" alt="{}"><h4>{}</h4></a>"#,
                html_escape(&article_link(self.article_page(), &article.slug)),
                html_escape(&article.image),
                title,
                title,
            ));
        }
        mount.set_html(html);
    }
}
