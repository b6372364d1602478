//! # Storage Layer
//!
//! Persistence for the two collections behind the [`DataStore`] trait, so the
//! API can run against files in production and memory in tests.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON file per collection inside a data directory
//! - [`memory::InMemoryStore`]: keeps encoded snapshots in memory, for tests
//!
//! ## Storage Format
//!
//! ```text
//! <data-dir>/
//! ├── contacts.json   # {"format": "pocketbook/contacts", "version": 1, "data": {...}}
//! ├── notes.json      # {"format": "pocketbook/notes", "version": 1, "data": {...}}
//! └── config.json     # optional, see config.rs
//! ```
//!
//! Each file is a whole-collection snapshot wrapped in a small envelope that
//! names the collection and the format version. A file with a different
//! format name or an unknown version is refused rather than guessed at, and
//! it is set aside as `<file>.bak` before the next save writes a fresh one.

use crate::address_book::AddressBook;
use crate::error::{BookError, Result};
use crate::notebook::Notebook;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

pub const FORMAT_VERSION: u32 = 1;

/// Abstract interface for persisting the contact book and the notebook.
///
/// Loads return `Ok(None)` when nothing has been saved yet. Saves replace the
/// whole collection.
pub trait DataStore {
    fn load_contacts(&self) -> Result<Option<AddressBook>>;

    fn save_contacts(&mut self, book: &AddressBook) -> Result<()>;

    fn load_notes(&self) -> Result<Option<Notebook>>;

    fn save_notes(&mut self, notebook: &Notebook) -> Result<()>;

    /// Moves the saved snapshot of `collection` out of the way, so that a
    /// later save cannot overwrite a file that failed to load. Returns where
    /// it went, or `None` when there was nothing to move.
    fn set_aside(&mut self, collection: Collection) -> Result<Option<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Contacts,
    Notes,
}

impl Collection {
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Contacts => "contacts",
            Collection::Notes => "notes",
        }
    }

    pub fn format_name(&self) -> &'static str {
        match self {
            Collection::Contacts => "pocketbook/contacts",
            Collection::Notes => "pocketbook/notes",
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    format: String,
    version: u32,
    data: T,
}

pub(crate) fn encode<T: Serialize>(collection: Collection, data: &T) -> Result<String> {
    let envelope = Envelope {
        format: collection.format_name().to_string(),
        version: FORMAT_VERSION,
        data,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

pub(crate) fn decode<T: DeserializeOwned>(collection: Collection, text: &str) -> Result<T> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(text)?;
    if envelope.format != collection.format_name() {
        return Err(BookError::Persistence(format!(
            "expected {} data, found '{}'",
            collection.format_name(),
            envelope.format
        )));
    }
    if envelope.version != FORMAT_VERSION {
        return Err(BookError::Persistence(format!(
            "unsupported {} format version {} (this build reads version {})",
            collection.format_name(),
            envelope.version,
            FORMAT_VERSION
        )));
    }
    Ok(serde_json::from_value(envelope.data)?)
}
