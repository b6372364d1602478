//! # Address Book
//!
//! The contact collection: an id-keyed map of [`Record`]s that owns id
//! allocation and recycling, free-text search, and field-by-field edits.
//!
//! ## Id allocation
//!
//! Ids start at 1. Deleting a record releases its id into a free set; the
//! next insert takes the smallest free id before trying anything new. When
//! the free set is empty, `next_id` is advanced past every id that is in use
//! (or still waiting in the free set) and that value is handed out. The cost
//! is linear in the gap being skipped, which is fine for a personal book.
//!
//! Invariants:
//! - every key in `records` is >= 1 and equals its record's `id`
//! - no id is both in `records` and in `free_ids`
//!
//! ## Iteration
//!
//! Records iterate in ascending id order. [`AddressBook::pages`] returns a
//! borrowing iterator of fixed-size batches; calling it again restarts.

use crate::error::{BookError, Result};
use crate::model::{Birthday, Email, Name, Phone, Record, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, BTreeSet};

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    records: BTreeMap<RecordId, Record>,
    #[serde(default = "first_id")]
    next_id: RecordId,
    #[serde(default)]
    free_ids: BTreeSet<RecordId>,
}

fn first_id() -> RecordId {
    1
}

impl Default for AddressBook {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: first_id(),
            free_ids: BTreeSet::new(),
        }
    }
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next id to `record`, stores it and returns the id.
    pub fn add_record(&mut self, mut record: Record) -> RecordId {
        let id = self.next_record_id();
        record.id = Some(id);
        self.records.insert(id, record);
        tracing::debug!(id, total = self.records.len(), "record added");
        id
    }

    /// Smallest released id if any, otherwise the first never-used one.
    pub fn next_record_id(&mut self) -> RecordId {
        while let Some(id) = self.free_ids.pop_first() {
            // A hand-edited file could list an id that is still taken.
            if id >= 1 && !self.records.contains_key(&id) {
                return id;
            }
        }

        self.next_id = self.next_id.max(1);
        while self.records.contains_key(&self.next_id) || self.free_ids.contains(&self.next_id) {
            self.next_id += 1;
        }
        self.next_id
    }

    /// Case-insensitive substring on the name, or case-sensitive substring on
    /// any phone or email. Each record appears at most once.
    pub fn find_record(&self, term: &str) -> Vec<&Record> {
        let term_lower = term.to_lowercase();
        self.records
            .values()
            .filter(|record| {
                record.name.value().to_lowercase().contains(&term_lower)
                    || record.phones.iter().any(|p| p.value().contains(term))
                    || record.emails.iter().any(|e| e.value().contains(term))
            })
            .collect()
    }

    pub fn find_records_by_name(&self, term: &str) -> Vec<(RecordId, &Record)> {
        let term_lower = term.to_lowercase();
        self.records
            .iter()
            .filter(|(_, record)| record.name.value().to_lowercase().contains(&term_lower))
            .map(|(id, record)| (*id, record))
            .collect()
    }

    /// Removes the record and releases its id for reuse.
    pub fn delete_record_by_id(&mut self, id: RecordId) -> Result<Record> {
        let record = self
            .records
            .remove(&id)
            .ok_or_else(|| BookError::NotFound(format!("no record with ID {}", id)))?;
        self.free_ids.insert(id);
        tracing::debug!(id, free = self.free_ids.len(), "record deleted, id released");
        Ok(record)
    }

    /// Applies each requested change independently. A rejected field is
    /// reported and left as it was; the other fields still apply.
    pub fn edit_record(&mut self, id: RecordId, edit: &RecordEdit) -> Result<Vec<FieldOutcome>> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or_else(|| BookError::NotFound(format!("no record with ID {}", id)))?;
        let mut outcomes = Vec::new();

        if let Some(value) = non_blank(&edit.name) {
            outcomes.push(match Name::new(value) {
                Ok(name) => {
                    record.edit_name(name);
                    FieldOutcome::updated(EditField::Name, value)
                }
                Err(e) => FieldOutcome::rejected(EditField::Name, e.to_string()),
            });
        }

        if let Some((position, value)) = &edit.phone {
            outcomes.push(replace_at(
                &mut record.phones,
                EditField::Phone,
                *position,
                value,
                Phone::new,
            ));
        }

        if let Some((position, value)) = &edit.email {
            outcomes.push(replace_at(
                &mut record.emails,
                EditField::Email,
                *position,
                value,
                Email::new,
            ));
        }

        if let Some(value) = non_blank(&edit.birthday) {
            outcomes.push(match Birthday::new(value) {
                Ok(birthday) => {
                    record.set_birthday(birthday);
                    FieldOutcome::updated(EditField::Birthday, value)
                }
                Err(e) => FieldOutcome::rejected(EditField::Birthday, e.to_string()),
            });
        }

        Ok(outcomes)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn free_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.free_ids.iter().copied()
    }

    /// Batches of `page_size` records (at least one per page).
    pub fn pages(&self, page_size: usize) -> Pages<'_> {
        Pages {
            records: self.records.values(),
            page_size: page_size.max(1),
        }
    }
}

pub struct Pages<'a> {
    records: btree_map::Values<'a, RecordId, Record>,
    page_size: usize,
}

impl<'a> Iterator for Pages<'a> {
    type Item = Vec<&'a Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let page: Vec<_> = self.records.by_ref().take(self.page_size).collect();
        if page.is_empty() {
            None
        } else {
            Some(page)
        }
    }
}

/// Already-collected answers of an interactive edit. `None` or a blank
/// string skips that field. Positions are the 1-based list numbers shown
/// to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordEdit {
    pub name: Option<String>,
    pub phone: Option<(usize, String)>,
    pub email: Option<(usize, String)>,
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Phone,
    Email,
    Birthday,
}

impl std::fmt::Display for EditField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EditField::Name => "name",
            EditField::Phone => "phone",
            EditField::Email => "email",
            EditField::Birthday => "birthday",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Updated { field: EditField, value: String },
    Rejected { field: EditField, reason: String },
}

impl FieldOutcome {
    fn updated(field: EditField, value: &str) -> Self {
        FieldOutcome::Updated {
            field,
            value: value.to_string(),
        }
    }

    fn rejected(field: EditField, reason: impl Into<String>) -> Self {
        FieldOutcome::Rejected {
            field,
            reason: reason.into(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn replace_at<T, E: std::fmt::Display>(
    items: &mut [T],
    field: EditField,
    position: usize,
    value: &str,
    parse: impl Fn(&str) -> std::result::Result<T, E>,
) -> FieldOutcome {
    let value = value.trim();
    if position == 0 || position > items.len() {
        return FieldOutcome::rejected(
            field,
            format!("there is no {} number {} to replace", field, position),
        );
    }
    match parse(value) {
        Ok(item) => {
            items[position - 1] = item;
            FieldOutcome::updated(field, value)
        }
        Err(e) => FieldOutcome::rejected(field, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Record {
        Record::new(Name::new(name).unwrap())
    }

    fn record_with_phone(name: &str, phone: &str) -> Record {
        let mut r = record(name);
        r.add_phone(Phone::new(phone).unwrap());
        r
    }

    fn ids(book: &AddressBook) -> Vec<RecordId> {
        book.iter().filter_map(|r| r.id).collect()
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut book = AddressBook::new();
        assert_eq!(book.add_record(record("A")), 1);
        assert_eq!(book.add_record(record("B")), 2);
        assert_eq!(book.add_record(record("C")), 3);
        assert_eq!(ids(&book), vec![1, 2, 3]);
    }

    #[test]
    fn deleted_id_is_reused_first() {
        let mut book = AddressBook::new();
        for name in ["A", "B", "C"] {
            book.add_record(record(name));
        }
        book.delete_record_by_id(2).unwrap();

        assert_eq!(book.add_record(record("D")), 2);
        assert_eq!(book.add_record(record("E")), 4);
    }

    #[test]
    fn smallest_free_id_wins() {
        let mut book = AddressBook::new();
        for name in ["A", "B", "C", "D"] {
            book.add_record(record(name));
        }
        book.delete_record_by_id(3).unwrap();
        book.delete_record_by_id(1).unwrap();

        assert_eq!(book.add_record(record("E")), 1);
        assert_eq!(book.add_record(record("F")), 3);
        assert_eq!(book.add_record(record("G")), 5);
    }

    #[test]
    fn ids_stay_unique_under_churn() {
        let mut book = AddressBook::new();
        for i in 0..20 {
            book.add_record(record(&format!("P{}", i)));
            if i % 3 == 0 {
                let first = ids(&book)[0];
                book.delete_record_by_id(first).unwrap();
            }
        }
        let all = ids(&book);
        let unique: BTreeSet<_> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
        assert!(all.iter().all(|id| *id >= 1));
        for r in book.iter() {
            assert!(!book.free_ids().any(|f| Some(f) == r.id));
        }
    }

    #[test]
    fn stale_free_id_is_skipped() {
        let mut book: AddressBook = serde_json::from_str(
            r#"{"records":{"1":{"id":1,"name":"A","phones":[],"emails":[],"birthday":null,"address":null}},
                "next_id":1,"free_ids":[1]}"#,
        )
        .unwrap();
        assert_eq!(book.add_record(record("B")), 2);
    }

    #[test]
    fn delete_missing_id_is_not_found() {
        let mut book = AddressBook::new();
        assert!(matches!(
            book.delete_record_by_id(7),
            Err(BookError::NotFound(_))
        ));
        assert_eq!(book.free_ids().count(), 0);
    }

    #[test]
    fn find_record_matches_name_phone_or_email() {
        let mut book = AddressBook::new();
        book.add_record(record_with_phone("Anna Kowalska", "500500500"));
        let mut bob = record("Bob");
        bob.add_email(Email::new("bob@example.com").unwrap());
        book.add_record(bob);

        let found = book.find_record("Ann");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.value(), "Anna Kowalska");

        assert_eq!(book.find_record("anna").len(), 1);
        assert_eq!(book.find_record("500500500")[0].name.value(), "Anna Kowalska");
        assert_eq!(book.find_record("bob@")[0].name.value(), "Bob");
        assert!(book.find_record("zzz").is_empty());
    }

    #[test]
    fn find_record_email_match_is_case_sensitive() {
        let mut book = AddressBook::new();
        let mut rec = record("Zed");
        rec.add_email(Email::new("Zed.Work@example.com").unwrap());
        book.add_record(rec);

        assert_eq!(book.find_record("Work@").len(), 1);
        assert!(book.find_record("work@").is_empty());
    }

    #[test]
    fn find_record_lists_each_record_once() {
        let mut book = AddressBook::new();
        let mut rec = record_with_phone("Num 123", "123123123");
        rec.add_phone(Phone::new("123000000").unwrap());
        rec.add_email(Email::new("123@example.com").unwrap());
        book.add_record(rec);

        assert_eq!(book.find_record("123").len(), 1);
    }

    #[test]
    fn find_records_by_name_returns_ids() {
        let mut book = AddressBook::new();
        book.add_record(record("Anna"));
        book.add_record(record("Joanna"));
        book.add_record(record("Bob"));

        let found: Vec<_> = book
            .find_records_by_name("ANNA")
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(found, vec![1, 2]);
    }

    #[test]
    fn pages_come_in_fives_and_restart() {
        let mut book = AddressBook::new();
        for i in 0..12 {
            book.add_record(record(&format!("P{}", i)));
        }

        let sizes: Vec<_> = book.pages(DEFAULT_PAGE_SIZE).map(|p| p.len()).collect();
        assert_eq!(sizes, vec![5, 5, 2]);

        let first_again = book.pages(DEFAULT_PAGE_SIZE).next().unwrap();
        assert_eq!(first_again[0].id, Some(1));
        assert_eq!(AddressBook::new().pages(5).count(), 0);
    }

    #[test]
    fn edit_applies_fields_independently() {
        let mut book = AddressBook::new();
        let mut rec = record_with_phone("Anna", "111111111");
        rec.add_phone(Phone::new("222222222").unwrap());
        rec.add_email(Email::new("anna@example.com").unwrap());
        let id = book.add_record(rec);

        let edit = RecordEdit {
            name: Some("Anna Nowak".into()),
            phone: Some((2, "12ab".into())),
            email: Some((1, "anna@new.example.org".into())),
            birthday: Some("1990-02-30".into()),
        };
        let outcomes = book.edit_record(id, &edit).unwrap();

        assert!(matches!(
            outcomes[0],
            FieldOutcome::Updated { field: EditField::Name, .. }
        ));
        assert!(matches!(
            outcomes[1],
            FieldOutcome::Rejected { field: EditField::Phone, .. }
        ));
        assert!(matches!(
            outcomes[2],
            FieldOutcome::Updated { field: EditField::Email, .. }
        ));
        assert!(matches!(
            outcomes[3],
            FieldOutcome::Rejected { field: EditField::Birthday, .. }
        ));

        let rec = book.get(id).unwrap();
        assert_eq!(rec.name.value(), "Anna Nowak");
        assert_eq!(rec.phones[1].value(), "222222222");
        assert_eq!(rec.emails[0].value(), "anna@new.example.org");
        assert!(rec.birthday.is_none());
    }

    #[test]
    fn edit_replaces_phone_in_place() {
        let mut book = AddressBook::new();
        let mut rec = record_with_phone("Anna", "111111111");
        rec.add_phone(Phone::new("222222222").unwrap());
        let id = book.add_record(rec);

        let edit = RecordEdit {
            phone: Some((1, "333333333".into())),
            ..Default::default()
        };
        book.edit_record(id, &edit).unwrap();

        let values: Vec<_> = book.get(id).unwrap().phones.iter().map(|p| p.value()).collect();
        assert_eq!(values, vec!["333333333", "222222222"]);
    }

    #[test]
    fn edit_rejects_out_of_range_position() {
        let mut book = AddressBook::new();
        let id = book.add_record(record_with_phone("Anna", "111111111"));

        for position in [0, 2] {
            let edit = RecordEdit {
                phone: Some((position, "333333333".into())),
                ..Default::default()
            };
            let outcomes = book.edit_record(id, &edit).unwrap();
            assert!(matches!(outcomes[0], FieldOutcome::Rejected { .. }));
        }
        assert_eq!(book.get(id).unwrap().phones[0].value(), "111111111");
    }

    #[test]
    fn blank_edit_changes_nothing() {
        let mut book = AddressBook::new();
        let id = book.add_record(record("Anna"));
        let before = book.clone();

        let edit = RecordEdit {
            name: Some("  ".into()),
            birthday: Some(String::new()),
            ..Default::default()
        };
        assert!(book.edit_record(id, &edit).unwrap().is_empty());
        assert_eq!(book, before);
    }

    #[test]
    fn edit_unknown_record_is_not_found() {
        let mut book = AddressBook::new();
        assert!(matches!(
            book.edit_record(4, &RecordEdit::default()),
            Err(BookError::NotFound(_))
        ));
    }
}
