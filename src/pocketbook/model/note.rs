use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type NoteId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Durable id, assigned once by the notebook and never reused.
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// In entry order; duplicates are kept.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(id: NoteId, title: String, content: String, tags: Vec<String>) -> Self {
        Self {
            id,
            title,
            content,
            tags,
            created_at: Utc::now(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tag_count(&self, tag: &str) -> usize {
        self.tags.iter().filter(|t| *t == tag).count()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} Title: {}\n    Content: {}\n    Tags: {}",
            self.id,
            self.title,
            self.content,
            self.tags.join(", ")
        )
    }
}

/// Splits a comma-separated tag string. Blank entries are dropped,
/// order and duplicates are preserved.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
