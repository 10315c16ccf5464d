//! Shared utility functions.
//!
//! This module contains reusable utilities used across the codebase:
//! - `html`: HTML escaping for safe rendering
//! - `dates`: timestamp parsing and locale date formatting
//! - `links`: links to the article page

mod dates;
mod html;
mod links;

pub use dates::{locale_from_env, parse_locale, parse_timestamp, DateFormatter, DisplayZone, Timestamp};
pub use html::html_escape;
pub use links::article_link;
