//! In-memory page with an explicit set of mount points.

use std::collections::BTreeMap;

use super::{query_param, MountPoint, PageContext};

/// A page built in code rather than parsed from markup.
///
/// Handy for embedding the renderers elsewhere and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    mounts: BTreeMap<String, MountPoint>,
    query: String,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty mount point.
    pub fn with_mount(self, name: &str) -> Self {
        self.with_mount_html(name, "")
    }

    /// Add a mount point with initial markup.
    pub fn with_mount_html(mut self, name: &str, initial: &str) -> Self {
        self.mounts.insert(name.to_string(), MountPoint::new(initial));
        self
    }

    /// Set the page's query string.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    /// Current markup of a mount point.
    pub fn html(&self, name: &str) -> Option<&str> {
        self.mounts.get(name).map(MountPoint::html)
    }

    /// Read-only access to a mount point.
    pub fn get(&self, name: &str) -> Option<&MountPoint> {
        self.mounts.get(name)
    }
}

impl PageContext for MemoryPage {
    fn mount_point(&mut self, name: &str) -> Option<&mut MountPoint> {
        self.mounts.get_mut(name)
    }

    fn has_mount_point(&self, name: &str) -> bool {
        self.mounts.contains_key(name)
    }

    fn query_param(&self, name: &str) -> Option<String> {
        query_param(&self.query, name)
    }
}
