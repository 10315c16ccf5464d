//! Page access for the renderers.
//!
//! Renderers never reach for a global document. They receive a
//! `PageContext`, which exposes the page's named mount points and its query
//! parameters. Which mount points a page has decides which flows run.

mod html;
mod memory;

pub use html::{HtmlPage, PageError};
pub use memory::MemoryPage;

/// Featured article heading on the homepage.
pub const MOUNT_HERO: &str = "hero";
/// Events sidebar.
pub const MOUNT_EVENTS: &str = "events";
/// News grid.
pub const MOUNT_NEWS: &str = "news";
/// Photo stories strip.
pub const MOUNT_PHOTO_STORIES: &str = "photo-stories";
/// Body of the article page.
pub const MOUNT_ARTICLE: &str = "article-content";

/// Every mount point name the renderers know about.
pub const MOUNT_NAMES: [&str; 5] = [
    MOUNT_HERO,
    MOUNT_EVENTS,
    MOUNT_NEWS,
    MOUNT_PHOTO_STORIES,
    MOUNT_ARTICLE,
];

/// A named region of the page whose content is replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPoint {
    html: String,
    modified: bool,
}

impl MountPoint {
    /// A mount point holding the page's initial markup.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            html: initial.into(),
            modified: false,
        }
    }

    /// Current markup.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Replace the content.
    pub fn set_html(&mut self, markup: impl Into<String>) {
        self.html = markup.into();
        self.modified = true;
    }

    pub fn clear(&mut self) {
        self.set_html(String::new());
    }

    /// Whether anything was written since the page loaded.
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}

/// Capability-scoped view of the current page.
pub trait PageContext {
    /// Look up a mount point by name. `None` means the page has no such
    /// section.
    fn mount_point(&mut self, name: &str) -> Option<&mut MountPoint>;

    /// Whether the page has a mount point with this name.
    fn has_mount_point(&self, name: &str) -> bool;

    /// First value of a query parameter from the page address.
    fn query_param(&self, name: &str) -> Option<String>;
}

/// First value of `name` in a query string, with or without the leading `?`.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
