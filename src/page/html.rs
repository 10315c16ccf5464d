//! Page shells parsed from HTML.
//!
//! A shell is a site page (`index.html`, `article.html`) whose mount points
//! are elements with a matching `id`. Mount points are discovered with
//! scraper, located in the source text, and written back in place so the
//! rest of the document is emitted byte-for-byte.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

use super::{query_param, MountPoint, PageContext, MOUNT_NAMES};

/// Errors that can occur while loading a page shell.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Mount point #{0} has no closing tag")]
    Unclosed(String),

    #[error("Mount point #{0} needs a quoted id attribute")]
    Unlocatable(String),

    #[error("Mount point #{inner} is nested inside #{outer}")]
    Nested { outer: String, inner: String },
}

/// Comments and raw-text elements. Markup inside them isn't part of the
/// document tree.
static INERT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<!--.*?(?:-->|\z)|<script\b[^>]*>.*?(?:</script\s*>|\z)|<style\b[^>]*>.*?(?:</style\s*>|\z)",
    )
    .unwrap()
});

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    inner: Range<usize>,
    mount: MountPoint,
}

/// A page shell with its mount points.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    source: String,
    slots: Vec<Slot>,
    query: String,
}

impl HtmlPage {
    /// Parse a page shell. `query` is the page address's query string.
    pub fn from_html(source: &str, query: &str) -> Result<Self, PageError> {
        let document = Html::parse_document(source);
        let masked = mask_inert(source);

        let mut slots = Vec::new();
        for name in MOUNT_NAMES {
            let selector = match Selector::parse(&format!("#{}", name)) {
                Ok(s) => s,
                Err(_) => continue,
            };
            let Some(element) = document.select(&selector).next() else {
                continue;
            };

            let tag = element.value().name();
            let inner = locate_inner(&masked, name, tag)?;
            tracing::debug!("Found mount point #{} <{}> at {:?}", name, tag, inner);

            slots.push(Slot {
                name: name.to_string(),
                mount: MountPoint::new(&source[inner.clone()]),
                inner,
            });
        }

        slots.sort_by_key(|slot| slot.inner.start);
        for pair in slots.windows(2) {
            if pair[1].inner.start < pair[0].inner.end {
                return Err(PageError::Nested {
                    outer: pair[0].name.clone(),
                    inner: pair[1].name.clone(),
                });
            }
        }

        Ok(Self {
            source: source.to_string(),
            slots,
            query: query.to_string(),
        })
    }

    /// Names of the mount points present, in document order.
    pub fn mount_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Names of the mount points written since the shell was loaded.
    pub fn modified_mounts(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|slot| slot.mount.is_modified())
            .map(|slot| slot.name.as_str())
            .collect()
    }

    /// Current markup of a mount point.
    pub fn html(&self, name: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .map(|slot| slot.mount.html())
    }

    /// The full document with current mount point contents.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for slot in &self.slots {
            out.push_str(&self.source[cursor..slot.inner.start]);
            out.push_str(slot.mount.html());
            cursor = slot.inner.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

impl PageContext for HtmlPage {
    fn mount_point(&mut self, name: &str) -> Option<&mut MountPoint> {
        self.slots
            .iter_mut()
            .find(|slot| slot.name == name)
            .map(|slot| &mut slot.mount)
    }

    fn has_mount_point(&self, name: &str) -> bool {
        self.slots.iter().any(|slot| slot.name == name)
    }

    fn query_param(&self, name: &str) -> Option<String> {
        query_param(&self.query, name)
    }
}

/// Blank out comments, scripts and styles. Byte offsets are preserved, so
/// ranges found in the result index the original source.
fn mask_inert(source: &str) -> String {
    let mut masked = source.to_string();
    for inert in INERT.find_iter(source) {
        masked.replace_range(inert.range(), &" ".repeat(inert.len()));
    }
    masked
}

/// Byte range of an element's content, between its open and close tags.
/// `source` must already have its inert regions masked.
fn locate_inner(source: &str, id: &str, tag: &str) -> Result<Range<usize>, PageError> {
    let open = Regex::new(&format!(
        r#"(?is)<{tag}\b[^>]*?\sid\s*=\s*(?:"{id}"|'{id}')[^>]*>"#,
        tag = regex::escape(tag),
        id = regex::escape(id),
    ))
    .map_err(|_| PageError::Unlocatable(id.to_string()))?;

    let open_tag = open
        .find(source)
        .ok_or_else(|| PageError::Unlocatable(id.to_string()))?;

    let tags = Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(tag)))
        .map_err(|_| PageError::Unlocatable(id.to_string()))?;

    let start = open_tag.end();
    let mut depth = 1usize;
    for caps in tags.captures_iter(&source[start..]) {
        let Some(whole) = caps.get(0) else { continue };
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                return Ok(start..start + whole.start());
            }
        } else if !whole.as_str().ends_with("/>") {
            depth += 1;
        }
    }

    Err(PageError::Unclosed(id.to_string()))
}
