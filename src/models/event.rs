//! Event model and the `events.json` envelope.

use serde::{Deserialize, Serialize};

/// A listing in the events sidebar. Collection order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
}

impl Event {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
        }
    }
}

/// The `events.json` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCollection {
    #[serde(default)]
    pub events: Vec<Event>,
}
