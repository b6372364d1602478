//! # Notebook
//!
//! An ordered list of tagged [`Note`]s. Every note gets a durable id when it
//! is created; edits and deletes address notes by that id, so re-sorting the
//! list never changes which note a number refers to.
//!
//! Tag views that work on the same list are reached through
//! [`Notebook::tags`], which lends the list to a [`TagManager`] for the
//! duration of the call.

use crate::error::{BookError, Result};
use crate::model::{parse_tags, Note, NoteId};
use crate::tags::TagManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    notes: Vec<Note>,
    #[serde(default = "first_id")]
    next_id: NoteId,
}

fn first_id() -> NoteId {
    1
}

impl Default for Notebook {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            next_id: first_id(),
        }
    }
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_note(&mut self, title: String, content: String, tags: Vec<String>) -> &Note {
        // Never hand out an id a loaded note already carries.
        let max_existing = self.notes.iter().map(|n| n.id).max().unwrap_or(0);
        let id = self.next_id.max(max_existing + 1);
        self.next_id = id + 1;

        self.notes.push(Note::new(id, title, content, tags));
        tracing::debug!(id, total = self.notes.len(), "note added");
        &self.notes[self.notes.len() - 1]
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<Note> {
        let pos = self.position(id)?;
        Ok(self.notes.remove(pos))
    }

    /// Title and content change only when a non-blank replacement is given;
    /// a non-blank tag string replaces the whole tag list.
    pub fn edit_note(&mut self, id: NoteId, edit: &NoteEdit) -> Result<&Note> {
        let pos = self.position(id)?;
        let note = &mut self.notes[pos];

        if let Some(title) = non_blank(&edit.title) {
            note.title = title.to_string();
        }
        if let Some(content) = non_blank(&edit.content) {
            note.content = content.to_string();
        }
        if let Some(tags) = non_blank(&edit.tags) {
            note.tags = parse_tags(tags);
        }
        Ok(note)
    }

    /// Exact, case-sensitive tag membership.
    pub fn search_notes_by_tag(&self, tag: &str) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.has_tag(tag)).collect()
    }

    /// Moves every note carrying `tag` to the front, newest first; the rest
    /// keep their relative order. Returns `false` (and leaves the list alone)
    /// when no note has the tag.
    pub fn sort_notes_by_tags(&mut self, tag: &str) -> bool {
        if !self.notes.iter().any(|n| n.has_tag(tag)) {
            return false;
        }
        let (mut tagged, rest): (Vec<Note>, Vec<Note>) =
            self.notes.drain(..).partition(|n| n.has_tag(tag));
        tagged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.notes = tagged;
        self.notes.extend(rest);
        true
    }

    pub fn show_unique_tags(&self) -> BTreeSet<String> {
        self.notes
            .iter()
            .flat_map(|n| n.tags.iter().cloned())
            .collect()
    }

    pub fn tags(&mut self) -> TagManager<'_> {
        TagManager::new(&mut self.notes)
    }

    fn position(&self, id: NoteId) -> Result<usize> {
        self.notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| BookError::NotFound(format!("no note with ID {}", id)))
    }
}

/// Collected answers of an interactive note edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteEdit {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Comma-separated; replaces the tag list as a whole.
    pub tags: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
