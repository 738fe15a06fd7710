use std::collections::VecDeque;

use serde::Serialize;
use uuid::Uuid;

use crate::app::util::time::current_time_in_millis;

pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub image_url: String,
    pub prompt: String,
    /// Milliseconds since the unix epoch.
    pub timestamp: u64,
}

impl HistoryEntry {
    pub fn new(image_url: &str, prompt: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            image_url: image_url.to_string(),
            prompt: prompt.to_string(),
            timestamp: current_time_in_millis(),
        }
    }
}

/// Most recent successful generations, newest first.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
