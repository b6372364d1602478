use super::{decode, encode, Collection, DataStore};
use crate::address_book::AddressBook;
use crate::error::Result;
use crate::notebook::Notebook;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONTACTS_FILE: &str = "contacts.json";
pub const DEFAULT_NOTES_FILE: &str = "notes.json";

/// JSON files in a single data directory.
pub struct FileStore {
    root: PathBuf,
    contacts_file: String,
    notes_file: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            contacts_file: DEFAULT_CONTACTS_FILE.to_string(),
            notes_file: DEFAULT_NOTES_FILE.to_string(),
        }
    }

    pub fn with_file_names(mut self, contacts_file: &str, notes_file: &str) -> Self {
        self.contacts_file = contacts_file.to_string();
        self.notes_file = notes_file.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contacts_path(&self) -> PathBuf {
        self.root.join(&self.contacts_file)
    }

    pub fn notes_path(&self) -> PathBuf {
        self.root.join(&self.notes_file)
    }

    fn path_for(&self, collection: Collection) -> PathBuf {
        match collection {
            Collection::Contacts => self.contacts_path(),
            Collection::Notes => self.notes_path(),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, collection: Collection, path: &Path) -> Result<Option<T>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no saved data, starting empty");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let data = decode(collection, &text)?;
        tracing::info!(path = %path.display(), "loaded {}", collection.format_name());
        Ok(Some(data))
    }

    /// Writes next to the target and renames over it, so an interrupted
    /// write leaves the previous file in place.
    fn write<T: Serialize>(&self, collection: Collection, path: &Path, data: &T) -> Result<()> {
        self.ensure_dir()?;
        let text = encode(collection, data)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, path)?;
        tracing::info!(path = %path.display(), "saved {}", collection.format_name());
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load_contacts(&self) -> Result<Option<AddressBook>> {
        self.read(Collection::Contacts, &self.contacts_path())
    }

    fn save_contacts(&mut self, book: &AddressBook) -> Result<()> {
        self.write(Collection::Contacts, &self.contacts_path(), book)
    }

    fn load_notes(&self) -> Result<Option<Notebook>> {
        self.read(Collection::Notes, &self.notes_path())
    }

    fn save_notes(&mut self, notebook: &Notebook) -> Result<()> {
        self.write(Collection::Notes, &self.notes_path(), notebook)
    }

    fn set_aside(&mut self, collection: Collection) -> Result<Option<String>> {
        let path = self.path_for(collection);
        if fs::symlink_metadata(&path).is_err() {
            return Ok(None);
        }
        let mut backup = path.clone().into_os_string();
        backup.push(".bak");
        let backup = PathBuf::from(backup);
        fs::rename(&path, &backup)?;
        tracing::warn!(
            from = %path.display(),
            to = %backup.display(),
            "unreadable file set aside"
        );
        Ok(Some(backup.display().to_string()))
    }
}
