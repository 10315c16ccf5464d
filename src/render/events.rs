use super::SectionRenderer;
use crate::models::Event;
use crate::page::{PageContext, MOUNT_EVENTS};
use crate::utils::html_escape;

/// Heading of the events sidebar.
pub const EVENTS_HEADING: &str = "Whats Happening";

impl SectionRenderer {
    /// Render the events sidebar: a heading and one list item per event with
    /// its title and date.
    pub fn render_events<P>(&self, page: &mut P, events: &[Event])
    where
        P: PageContext + ?Sized,
    {
        let Some(mount) = page.mount_point(MOUNT_EVENTS) else {
            return;
        };
        mount.set_html(self.events_markup(events));
    }

    fn events_markup(&self, events: &[Event]) -> String {
        let mut html = format!("<h3>{}</h3><ul>", EVENTS_HEADING);
        for event in events {
            html.push_str(&format!(
                "<li>{} — {}</li>",
                html_escape(&event.title),
                html_escape(&self.dates().format_date(&event.date))
            ));
        }
        html.push_str("</ul>");
        html
    }
}
