use crate::address_book::{AddressBook, FieldOutcome, RecordEdit};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BookError, Result};
use crate::model::{Record, RecordId};

pub fn add(book: &mut AddressBook, record: Record) -> CmdResult {
    let id = book.add_record(record);
    let stored: Vec<Record> = book.get(id).cloned().into_iter().collect();
    CmdResult::default()
        .with_affected_records(stored)
        .with_message(CmdMessage::success(format!("Added contact with ID: {}.", id)))
}

pub fn find(book: &AddressBook, term: &str) -> CmdResult {
    let found: Vec<Record> = book.find_record(term).into_iter().cloned().collect();
    listed_or_empty(found, "No matching contacts.")
}

pub fn find_by_name(book: &AddressBook, term: &str) -> CmdResult {
    let found: Vec<Record> = book
        .find_records_by_name(term)
        .into_iter()
        .map(|(_, record)| record.clone())
        .collect();
    listed_or_empty(found, "No contacts with a matching name.")
}

pub fn delete_by_id(book: &mut AddressBook, id: RecordId) -> Result<CmdResult> {
    let record = book.delete_record_by_id(id)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Deleted contact with ID: {} ({}).",
            id, record.name
        )))
        .with_affected_records(vec![record]))
}

/// The id the user picked, provided it is one of the records matching `name_term`.
pub fn select_by_name(book: &AddressBook, name_term: &str, id: RecordId) -> Result<RecordId> {
    let listed = book
        .find_records_by_name(name_term)
        .iter()
        .any(|(candidate, _)| *candidate == id);
    if !listed {
        return Err(BookError::NotFound(format!(
            "ID {} is not one of the contacts matching '{}'",
            id, name_term
        )));
    }
    Ok(id)
}

/// Name-guided delete: the id must be among the name matches.
pub fn delete(book: &mut AddressBook, name_term: &str, id: RecordId) -> Result<CmdResult> {
    let id = select_by_name(book, name_term, id)?;
    delete_by_id(book, id)
}

pub fn edit(book: &mut AddressBook, id: RecordId, edit: &RecordEdit) -> Result<CmdResult> {
    let outcomes = book.edit_record(id, edit)?;
    let mut result = CmdResult::default();

    for outcome in &outcomes {
        result.add_message(match outcome {
            FieldOutcome::Updated { field, value } => {
                CmdMessage::success(format!("Updated {}: {}", field, value))
            }
            FieldOutcome::Rejected { field, reason } => {
                CmdMessage::warning(format!("Kept the old {}: {}", field, reason))
            }
        });
    }

    let changed = outcomes
        .iter()
        .any(|o| matches!(o, FieldOutcome::Updated { .. }));
    result.add_message(if changed {
        CmdMessage::success(format!("Contact {} updated.", id))
    } else {
        CmdMessage::info(format!("Contact {} left unchanged.", id))
    });
    result.affected_records = book.get(id).cloned().into_iter().collect();
    Ok(result)
}

pub fn show(book: &AddressBook, page_size: usize) -> CmdResult {
    let mut result = CmdResult::default();
    result.record_pages = book
        .pages(page_size)
        .map(|page| page.into_iter().cloned().collect())
        .collect();
    if result.record_pages.is_empty() {
        result.add_message(CmdMessage::info("The address book is empty."));
    }
    result
}

fn listed_or_empty(records: Vec<Record>, empty_message: &str) -> CmdResult {
    if records.is_empty() {
        CmdResult::default().with_message(CmdMessage::info(empty_message))
    } else {
        CmdResult::default().with_listed_records(records)
    }
}
