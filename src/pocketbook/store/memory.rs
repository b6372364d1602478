use super::{decode, encode, Collection, DataStore};
use crate::address_book::AddressBook;
use crate::error::Result;
use crate::notebook::Notebook;
use std::io;

/// In-memory storage for tests. Snapshots go through the same encoding as
/// [`super::fs::FileStore`], so a save/load cycle exercises serialization.
#[derive(Default)]
pub struct InMemoryStore {
    contacts: Option<String>,
    notes: Option<String>,
    set_aside: Vec<(Collection, String)>,
    read_only: Vec<Collection>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw snapshot text, e.g. to simulate a damaged file.
    pub fn with_raw_contacts(mut self, text: &str) -> Self {
        self.contacts = Some(text.to_string());
        self
    }

    pub fn with_raw_notes(mut self, text: &str) -> Self {
        self.notes = Some(text.to_string());
        self
    }

    /// Makes every save of `collection` fail, like a file that cannot be written.
    pub fn with_read_only(mut self, collection: Collection) -> Self {
        self.read_only.push(collection);
        self
    }

    /// The last snapshot of `collection` moved aside by [`DataStore::set_aside`].
    pub fn set_aside_snapshot(&self, collection: Collection) -> Option<&str> {
        self.set_aside
            .iter()
            .rev()
            .find(|(c, _)| *c == collection)
            .map(|(_, text)| text.as_str())
    }

    fn check_writable(&self, collection: Collection) -> Result<()> {
        if self.read_only.contains(&collection) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} are read-only", collection.label()),
            )
            .into());
        }
        Ok(())
    }

    pub fn has_contacts(&self) -> bool {
        self.contacts.is_some()
    }

    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }
}

impl DataStore for InMemoryStore {
    fn load_contacts(&self) -> Result<Option<AddressBook>> {
        self.contacts
            .as_deref()
            .map(|text| decode(Collection::Contacts, text))
            .transpose()
    }

    fn save_contacts(&mut self, book: &AddressBook) -> Result<()> {
        self.check_writable(Collection::Contacts)?;
        self.contacts = Some(encode(Collection::Contacts, book)?);
        Ok(())
    }

    fn load_notes(&self) -> Result<Option<Notebook>> {
        self.notes
            .as_deref()
            .map(|text| decode(Collection::Notes, text))
            .transpose()
    }

    fn save_notes(&mut self, notebook: &Notebook) -> Result<()> {
        self.check_writable(Collection::Notes)?;
        self.notes = Some(encode(Collection::Notes, notebook)?);
        Ok(())
    }

    fn set_aside(&mut self, collection: Collection) -> Result<Option<String>> {
        let slot = match collection {
            Collection::Contacts => &mut self.contacts,
            Collection::Notes => &mut self.notes,
        };
        Ok(slot.take().map(|text| {
            self.set_aside.push((collection, text));
            format!("memory:{}.bak", collection.label())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Name, Record};

    #[test]
    fn empty_store_loads_nothing() {
        let store = InMemoryStore::new();
        assert!(store.load_contacts().unwrap().is_none());
        assert!(store.load_notes().unwrap().is_none());
    }

    #[test]
    fn saved_book_reuses_deleted_id_after_reload() {
        let mut book = AddressBook::new();
        for name in ["Anna", "Ghost", "Bob"] {
            book.add_record(Record::new(Name::new(name).unwrap()));
        }
        book.delete_record_by_id(2).unwrap();

        let mut store = InMemoryStore::new();
        store.save_contacts(&book).unwrap();
        let mut loaded = store.load_contacts().unwrap().unwrap();

        let names: Vec<_> = loaded.iter().map(|r| (r.id, r.name.value().to_string())).collect();
        assert_eq!(
            names,
            vec![(Some(1), "Anna".to_string()), (Some(3), "Bob".to_string())]
        );
        assert_eq!(loaded.add_record(Record::new(Name::new("Cleo").unwrap())), 2);
    }

    #[test]
    fn read_only_collection_refuses_saves() {
        let mut store = InMemoryStore::new().with_read_only(Collection::Contacts);
        assert!(store.save_contacts(&AddressBook::new()).is_err());
        assert!(!store.has_contacts());
        store.save_notes(&Notebook::new()).unwrap();
        assert!(store.has_notes());
    }

    #[test]
    fn set_aside_moves_the_snapshot() {
        let mut store = InMemoryStore::new().with_raw_notes("garbage");
        assert!(store.set_aside(Collection::Notes).unwrap().is_some());
        assert!(!store.has_notes());
        assert_eq!(store.set_aside_snapshot(Collection::Notes), Some("garbage"));
        assert_eq!(store.set_aside(Collection::Contacts).unwrap(), None);
    }
}
