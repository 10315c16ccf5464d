//! newsfront - populates a static news site's pages.
//!
//! Loads the site's article and event data and renders it into the named
//! mount points of a page: the homepage gets its hero, news grid, photo
//! stories and events sidebar; the article page gets the article picked by
//! the `slug` query parameter.

pub mod config;
pub mod controller;
pub mod fetch;
pub mod models;
pub mod page;
pub mod render;
pub mod selector;
pub mod utils;

pub use controller::{DataPaths, FlowOutcome, LoadReport, PageController};
pub use fetch::{FetchError, FileFetcher, HttpFetcher, ResourceFetcher};
pub use models::{Article, Event, TrustedHtml};
pub use page::{HtmlPage, MemoryPage, MountPoint, PageContext};
pub use render::SectionRenderer;
