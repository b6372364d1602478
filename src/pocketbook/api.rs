//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! contact and note operation, whatever drives it.
//!
//! `BookApi` owns the two in-memory collections for the length of a session
//! and the [`DataStore`] they are loaded from and saved to. It:
//! - turns raw user text into typed arguments (ids, edits)
//! - dispatches to `commands::contacts` and `commands::notes`
//! - returns [`CmdResult`]s, never prints
//!
//! ## Generic Over DataStore
//!
//! - Production: `BookApi<FileStore>`
//! - Testing: `BookApi<InMemoryStore>`

use crate::address_book::{AddressBook, RecordEdit};
use crate::commands::{self, parse_id, CmdMessage, CmdResult};
use crate::config::BookConfig;
use crate::error::{BookError, Result};
use crate::model::{Note, Record};
use crate::notebook::{NoteEdit, Notebook};
use crate::store::{Collection, DataStore};

pub struct BookApi<S: DataStore> {
    store: S,
    config: BookConfig,
    book: AddressBook,
    notebook: Notebook,
    /// Collections whose saved snapshot could not be read; set aside before
    /// their next save.
    unreadable: Vec<Collection>,
}

impl<S: DataStore> BookApi<S> {
    pub fn new(store: S, config: BookConfig) -> Self {
        Self {
            store,
            config,
            book: AddressBook::new(),
            notebook: Notebook::new(),
            unreadable: Vec::new(),
        }
    }

    /// Replaces both collections with what the store holds. A collection that
    /// was never saved starts empty; one that cannot be read also starts
    /// empty and is reported as an error message, without affecting the other.
    /// Its file is left alone until the next save sets it aside.
    pub fn load(&mut self) -> CmdResult {
        let mut result = CmdResult::default();
        self.unreadable.clear();

        match self.store.load_contacts() {
            Ok(Some(book)) => {
                result.add_message(CmdMessage::info(format!(
                    "Loaded {} contact(s).",
                    book.len()
                )));
                self.book = book;
            }
            Ok(None) => {
                self.book = AddressBook::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load contacts");
                result.add_message(CmdMessage::error(format!(
                    "Could not load contacts, starting with an empty address book: {}",
                    e
                )));
                self.book = AddressBook::new();
                self.unreadable.push(Collection::Contacts);
            }
        }

        match self.store.load_notes() {
            Ok(Some(notebook)) => {
                result.add_message(CmdMessage::info(format!(
                    "Loaded {} note(s).",
                    notebook.len()
                )));
                self.notebook = notebook;
            }
            Ok(None) => {
                self.notebook = Notebook::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load notes");
                result.add_message(CmdMessage::error(format!(
                    "Could not load notes, starting with an empty notebook: {}",
                    e
                )));
                self.notebook = Notebook::new();
                self.unreadable.push(Collection::Notes);
            }
        }

        result
    }

    /// Saves each collection independently: a failure is reported as an
    /// error message and does not stop the other collection from being saved.
    pub fn save(&mut self) -> CmdResult {
        let mut result = CmdResult::default();
        self.save_collection(Collection::Contacts, &mut result);
        self.save_collection(Collection::Notes, &mut result);

        if !result.has_errors() {
            tracing::info!(
                contacts = self.book.len(),
                notes = self.notebook.len(),
                "saved"
            );
            result.add_message(CmdMessage::success("Data saved."));
        }
        result
    }

    fn save_collection(&mut self, collection: Collection, result: &mut CmdResult) {
        let label = collection.label();

        if self.unreadable.contains(&collection) {
            match self.store.set_aside(collection) {
                Ok(Some(place)) => result.add_message(CmdMessage::warning(format!(
                    "The unreadable {} file was kept as {}.",
                    label, place
                ))),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, collection = label, "could not set file aside");
                    result.add_message(CmdMessage::error(format!(
                        "Did not save {}: the unreadable file could not be moved aside: {}",
                        label, e
                    )));
                    return;
                }
            }
            self.unreadable.retain(|c| *c != collection);
        }

        let saved = match collection {
            Collection::Contacts => self.store.save_contacts(&self.book),
            Collection::Notes => self.store.save_notes(&self.notebook),
        };
        if let Err(e) = saved {
            tracing::warn!(error = %e, collection = label, "could not save");
            result.add_message(CmdMessage::error(format!("Could not save {}: {}", label, e)));
        }
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // Contacts

    pub fn add_contact(&mut self, record: Record) -> CmdResult {
        commands::contacts::add(&mut self.book, record)
    }

    pub fn find_contacts(&self, term: &str) -> CmdResult {
        commands::contacts::find(&self.book, term.trim())
    }

    pub fn find_contacts_by_name(&self, term: &str) -> CmdResult {
        commands::contacts::find_by_name(&self.book, term.trim())
    }

    /// Looks up a contact by a typed id, for flows that show it before acting.
    pub fn contact(&self, id_input: &str) -> Result<&Record> {
        let id = parse_id(id_input)?;
        self.book
            .get(id)
            .ok_or_else(|| BookError::NotFound(format!("no contact with ID {}", id)))
    }

    /// A contact picked from the matches of a name search.
    pub fn select_contact(&self, name_term: &str, id_input: &str) -> Result<&Record> {
        let id = parse_id(id_input)?;
        let id = commands::contacts::select_by_name(&self.book, name_term.trim(), id)?;
        self.book
            .get(id)
            .ok_or_else(|| BookError::NotFound(format!("no contact with ID {}", id)))
    }

    pub fn delete_contact_by_name(&mut self, name_term: &str, id_input: &str) -> Result<CmdResult> {
        let id = parse_id(id_input)?;
        commands::contacts::delete(&mut self.book, name_term.trim(), id)
    }

    pub fn delete_contact(&mut self, id_input: &str) -> Result<CmdResult> {
        let id = parse_id(id_input)?;
        commands::contacts::delete_by_id(&mut self.book, id)
    }

    pub fn edit_contact(&mut self, id_input: &str, edit: &RecordEdit) -> Result<CmdResult> {
        let id = parse_id(id_input)?;
        commands::contacts::edit(&mut self.book, id, edit)
    }

    pub fn show_contacts(&self) -> CmdResult {
        commands::contacts::show(&self.book, self.config.page_size())
    }

    // Notes

    pub fn add_note(&mut self, title: &str, content: &str, tags: &str) -> CmdResult {
        commands::notes::add(&mut self.notebook, title, content, tags)
    }

    pub fn list_notes(&self) -> CmdResult {
        commands::notes::list(&self.notebook)
    }

    pub fn note(&self, id_input: &str) -> Result<&Note> {
        let id = parse_id(id_input)?;
        self.notebook
            .get(id)
            .ok_or_else(|| BookError::NotFound(format!("no note with ID {}", id)))
    }

    pub fn delete_note(&mut self, id_input: &str) -> Result<CmdResult> {
        let id = parse_id(id_input)?;
        commands::notes::delete(&mut self.notebook, id)
    }

    pub fn edit_note(&mut self, id_input: &str, edit: &NoteEdit) -> Result<CmdResult> {
        let id = parse_id(id_input)?;
        commands::notes::edit(&mut self.notebook, id, edit)
    }

    pub fn search_notes_by_tag(&self, tag: &str) -> CmdResult {
        commands::notes::search_tag(&self.notebook, tag)
    }

    pub fn sort_notes_by_recency(&mut self, tag: &str) -> CmdResult {
        commands::notes::sort_by_recency(&mut self.notebook, tag)
    }

    pub fn rank_notes_by_tag(&mut self, tag: &str) -> CmdResult {
        commands::notes::sort_by_count(&mut self.notebook, tag)
    }

    pub fn unique_tags(&self) -> CmdResult {
        commands::notes::unique_tags(&self.notebook)
    }
}
