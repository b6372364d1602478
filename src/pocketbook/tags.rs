//! Tag views over a notebook's notes.
//!
//! A [`TagManager`] borrows the notebook's list for as long as it lives, so it
//! always sees the current notes and can re-order them in place.

use crate::model::Note;
use std::collections::BTreeSet;

pub struct TagManager<'a> {
    notes: &'a mut Vec<Note>,
}

impl<'a> TagManager<'a> {
    pub fn new(notes: &'a mut Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn available_tags(&self) -> BTreeSet<String> {
        self.notes
            .iter()
            .flat_map(|n| n.tags.iter().cloned())
            .collect()
    }

    pub fn search_notes_by_tag(&self, tag: &str) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.has_tag(tag)).collect()
    }

    /// Re-orders the whole list by how often `tag` occurs in each note,
    /// highest first. Ties keep their order. `false` when no note has the tag.
    pub fn sort_notes_by_tags(&mut self, tag: &str) -> bool {
        if !self.notes.iter().any(|n| n.has_tag(tag)) {
            return false;
        }
        self.notes.sort_by_key(|n| std::cmp::Reverse(n.tag_count(tag)));
        true
    }
}
