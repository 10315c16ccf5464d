use super::SectionRenderer;
use crate::models::Article;
use crate::page::{PageContext, MOUNT_HERO};
use crate::utils::html_escape;

impl SectionRenderer {
    /// Render the featured article heading. The mount point is cleared
    /// first and stays empty when there is no article.
    pub fn render_hero<P>(&self, page: &mut P, article: Option<&Article>)
    where
        P: PageContext + ?Sized,
    {
        let Some(mount) = page.mount_point(MOUNT_HERO) else {
            return;
        };
        mount.clear();
        if let Some(article) = article {
            mount.set_html(format!("<h2>{}</h2>", html_escape(&article.title)));
        }
    }
}
