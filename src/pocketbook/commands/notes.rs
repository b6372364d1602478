use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{parse_tags, NoteId};
use crate::notebook::{NoteEdit, Notebook};

pub fn add(notebook: &mut Notebook, title: &str, content: &str, tags: &str) -> CmdResult {
    let note = notebook
        .add_note(title.trim().to_string(), content.to_string(), parse_tags(tags))
        .clone();
    CmdResult::default()
        .with_message(CmdMessage::success(format!("Added note with ID: {}.", note.id)))
        .with_listed_notes(vec![note])
}

pub fn list(notebook: &Notebook) -> CmdResult {
    if notebook.is_empty() {
        return CmdResult::default().with_message(CmdMessage::info("No notes yet."));
    }
    CmdResult::default().with_listed_notes(notebook.notes().to_vec())
}

pub fn delete(notebook: &mut Notebook, id: NoteId) -> Result<CmdResult> {
    let note = notebook.delete_note(id)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Deleted note with ID: {} ({}).",
        id, note.title
    ))))
}

pub fn edit(notebook: &mut Notebook, id: NoteId, edit: &NoteEdit) -> Result<CmdResult> {
    let note = notebook.edit_note(id, edit)?.clone();
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note {} updated.", id)))
        .with_listed_notes(vec![note]))
}

pub fn search_tag(notebook: &Notebook, tag: &str) -> CmdResult {
    let tag = tag.trim();
    let found: Vec<_> = notebook
        .search_notes_by_tag(tag)
        .into_iter()
        .cloned()
        .collect();
    if found.is_empty() {
        return CmdResult::default()
            .with_message(CmdMessage::info(format!("No notes tagged '{}'.", tag)));
    }
    CmdResult::default().with_listed_notes(found)
}

/// Tagged notes first, newest first.
pub fn sort_by_recency(notebook: &mut Notebook, tag: &str) -> CmdResult {
    let tag = tag.trim();
    let moved = notebook.sort_notes_by_tags(tag);
    sorted_result(notebook, tag, moved, "newest first")
}

/// Whole list ordered by how often each note carries the tag.
pub fn sort_by_count(notebook: &mut Notebook, tag: &str) -> CmdResult {
    let tag = tag.trim();
    let moved = notebook.tags().sort_notes_by_tags(tag);
    sorted_result(notebook, tag, moved, "by tag count")
}

pub fn unique_tags(notebook: &Notebook) -> CmdResult {
    let tags: Vec<String> = notebook.show_unique_tags().into_iter().collect();
    let message = if tags.is_empty() {
        CmdMessage::info("No tags yet.")
    } else {
        CmdMessage::info(format!("Available tags: {}", tags.join(", ")))
    };
    let mut result = CmdResult::default().with_message(message);
    result.tags = tags;
    result
}

fn sorted_result(notebook: &Notebook, tag: &str, moved: bool, order: &str) -> CmdResult {
    if !moved {
        return CmdResult::default().with_message(CmdMessage::warning(format!(
            "No notes tagged '{}', order unchanged.",
            tag
        )));
    }
    CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Notes tagged '{}' sorted {}.",
            tag, order
        )))
        .with_listed_notes(notebook.notes().to_vec())
}
