//! # Interactive Session
//!
//! The menu loop: reads choices and field values through a
//! [`UserInterface`], calls the [`BookApi`], and shows what comes back.
//!
//! ```text
//! main:      c (contacts) | n (notes) | q (save and quit)
//! contacts:  add | find | delete | edit | show | q
//! notes:     add | show | delete | edit | tag | sort | rank | tags | q
//! ```
//!
//! Every failure inside an action is shown and the current menu resumes.
//! Quitting, closed input or a broken console leave the loop, and leaving
//! always saves. A save that fails is reported; after `q` the user may go
//! back to the menu instead of quitting.

use crate::address_book::RecordEdit;
use crate::api::BookApi;
use crate::commands::CmdMessage;
use crate::error::{BookError, Result, ValidationError};
use crate::model::{Address, Birthday, Email, Name, Phone, Record};
use crate::notebook::NoteEdit;
use crate::store::DataStore;
use crate::ui::UserInterface;
use std::slice;

const MAIN_PROMPT: &str = "[c] contacts, [n] notes, [q] save and quit";
const CONTACTS_PROMPT: &str = "contacts: add, find, delete, edit, show, q";
const NOTES_PROMPT: &str = "notes: add, show, delete, edit, tag, sort, rank, tags, q";
const QUIT_UNSAVED_PROMPT: &str = "Some data was not saved. Quit anyway? (y/n)";

pub struct Session<S: DataStore, U: UserInterface> {
    api: BookApi<S>,
    ui: U,
}

impl<S: DataStore, U: UserInterface> Session<S, U> {
    pub fn new(api: BookApi<S>, ui: U) -> Self {
        Self { api, ui }
    }

    pub fn api(&self) -> &BookApi<S> {
        &self.api
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn into_parts(self) -> (BookApi<S>, U) {
        (self.api, self.ui)
    }

    /// Loads, runs the main menu until quit or end of input, then saves.
    pub fn run(&mut self) -> Result<()> {
        let loaded = self.api.load();
        self.ui.display_messages(&loaded.messages);

        loop {
            let input_open = self.main_menu()?;
            let saved = self.api.save();
            self.ui.display_messages(&saved.messages);
            if !saved.has_errors() || !input_open {
                return Ok(());
            }
            match self.confirm(QUIT_UNSAVED_PROMPT) {
                Ok(true) | Err(BookError::InputClosed) => return Ok(()),
                Ok(false) => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// `Ok(true)` when the user quit, `Ok(false)` when input ran out.
    fn main_menu(&mut self) -> Result<bool> {
        loop {
            let choice = match self.ui.get_input(MAIN_PROMPT) {
                Ok(choice) => choice,
                Err(BookError::InputClosed) => return Ok(false),
                Err(e) => return Err(e),
            };
            let outcome = match choice.trim().to_lowercase().as_str() {
                "c" => self.contacts_menu(),
                "n" => self.notes_menu(),
                "q" => return Ok(true),
                other => {
                    self.unknown_option(other);
                    Ok(())
                }
            };
            match outcome {
                Ok(()) => {}
                Err(BookError::InputClosed) => return Ok(false),
                Err(e) => return Err(e),
            }
        }
    }

    fn contacts_menu(&mut self) -> Result<()> {
        loop {
            let action = self.ui.get_input(CONTACTS_PROMPT)?;
            let outcome = match action.trim().to_lowercase().as_str() {
                "add" => self.add_contact(),
                "find" => self.find_contacts(),
                "delete" => self.delete_contact(),
                "edit" => self.edit_contact(),
                "show" => self.show_contacts(),
                "q" => return Ok(()),
                other => {
                    self.unknown_option(other);
                    Ok(())
                }
            };
            self.report(outcome)?;
        }
    }

    fn notes_menu(&mut self) -> Result<()> {
        loop {
            let action = self.ui.get_input(NOTES_PROMPT)?;
            let outcome = match action.trim().to_lowercase().as_str() {
                "add" => self.add_note(),
                "show" => {
                    let result = self.api.list_notes();
                    self.ui.display_result(&result);
                    Ok(())
                }
                "delete" => self.delete_note(),
                "edit" => self.edit_note(),
                "tag" => self.search_by_tag(),
                "sort" => self.sort_notes(),
                "rank" => self.rank_notes(),
                "tags" => {
                    let result = self.api.unique_tags();
                    self.ui.display_result(&result);
                    Ok(())
                }
                "q" => return Ok(()),
                other => {
                    self.unknown_option(other);
                    Ok(())
                }
            };
            self.report(outcome)?;
        }
    }

    /// Shows a recoverable failure; hands back the ones that end the session.
    fn report(&mut self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(e @ (BookError::InputClosed | BookError::Io(_))) => Err(e),
            Err(e) => {
                self.ui.display_message(&CmdMessage::error(e.to_string()));
                Ok(())
            }
        }
    }

    fn unknown_option(&mut self, option: &str) {
        self.ui.display_message(&CmdMessage::warning(format!(
            "Unknown option '{}', try again.",
            option
        )));
    }

    // Contacts

    fn add_contact(&mut self) -> Result<()> {
        let name = self.prompt_until_valid("Name", Name::new)?;
        let mut record = Record::new(name);

        if let Some(birthday) =
            self.prompt_optional("Birthday YYYY-MM-DD (empty to skip)", Birthday::new)?
        {
            record.set_birthday(birthday);
        }
        while let Some(phone) =
            self.prompt_optional("Phone number, 9 digits (empty to finish)", Phone::new)?
        {
            record.add_phone(phone);
        }
        while let Some(email) = self.prompt_optional("Email (empty to finish)", Email::new)? {
            record.add_email(email);
        }
        if self.confirm("Add an address? (y/n)")? {
            let street = self.ui.get_input("Street")?;
            let city = self.ui.get_input("City")?;
            let postal_code = self.ui.get_input("Postal code")?;
            let country = self.ui.get_input("Country")?;
            record.set_address(Address::new(
                street.trim(),
                city.trim(),
                postal_code.trim(),
                country.trim(),
            ));
        }

        let result = self.api.add_contact(record);
        self.ui.display_messages(&result.messages);
        self.ui.display_contacts(&result.affected_records);
        Ok(())
    }

    fn find_contacts(&mut self) -> Result<()> {
        let term = self.ui.get_input("Search for (name or phone)")?;
        let result = self.api.find_contacts(&term);
        self.ui.display_result(&result);
        Ok(())
    }

    fn delete_contact(&mut self) -> Result<()> {
        if let Some((term, id_input)) = self.choose_contact("delete")? {
            let result = self.api.delete_contact_by_name(&term, &id_input)?;
            self.ui.display_messages(&result.messages);
        }
        Ok(())
    }

    fn edit_contact(&mut self) -> Result<()> {
        let (term, id_input) = match self.choose_contact("edit")? {
            Some(choice) => choice,
            None => return Ok(()),
        };
        let record = self.api.select_contact(&term, &id_input)?.clone();
        self.ui.display_contacts(slice::from_ref(&record));

        let phones: Vec<&str> = record.phones.iter().map(Phone::value).collect();
        let emails: Vec<&str> = record.emails.iter().map(Email::value).collect();
        let edit = RecordEdit {
            name: Some(self.ui.get_input("New name (empty to keep)")?),
            phone: self.choose_replacement("phone", &phones)?,
            email: self.choose_replacement("email", &emails)?,
            birthday: Some(self.ui.get_input("New birthday YYYY-MM-DD (empty to keep)")?),
        };

        let result = self.api.edit_contact(&id_input, &edit)?;
        self.ui.display_messages(&result.messages);
        self.ui.display_contacts(&result.affected_records);
        Ok(())
    }

    fn show_contacts(&mut self) -> Result<()> {
        let result = self.api.show_contacts();
        self.ui.display_messages(&result.messages);

        let total = result.record_pages.len();
        for (i, page) in result.record_pages.iter().enumerate() {
            self.ui.display_contacts(page);
            if i + 1 < total && !self.confirm("Show the next page? (y/n)")? {
                break;
            }
        }
        Ok(())
    }

    /// Lists the name matches and asks for one of their ids. Returns the
    /// search term with the typed id, or `None` when nothing matched.
    fn choose_contact(&mut self, action: &str) -> Result<Option<(String, String)>> {
        let term = self
            .ui
            .get_input(&format!("Name of the contact to {}", action))?;
        let candidates = self.api.find_contacts_by_name(&term);
        self.ui.display_result(&candidates);
        if candidates.listed_records.is_empty() {
            return Ok(None);
        }

        let id_input = self.ui.get_input(&format!("ID of the contact to {}", action))?;
        Ok(Some((term, id_input)))
    }

    /// Asks which of `current` to replace (by 1-based number) and with what.
    fn choose_replacement(
        &mut self,
        field: &str,
        current: &[&str],
    ) -> Result<Option<(usize, String)>> {
        if current.is_empty() {
            return Ok(None);
        }
        let listing: Vec<String> = current
            .iter()
            .enumerate()
            .map(|(i, value)| format!("{}. {}", i + 1, value))
            .collect();
        self.ui.display_message(&CmdMessage::info(format!(
            "Current {}s: {}",
            field,
            listing.join(", ")
        )));

        let choice = self
            .ui
            .get_input(&format!("Number of the {} to change (empty to skip)", field))?;
        let choice = choice.trim();
        if choice.is_empty() {
            return Ok(None);
        }
        let position: usize = match choice.parse() {
            Ok(position) => position,
            Err(_) => {
                self.ui.display_message(&CmdMessage::warning(format!(
                    "'{}' is not a number, {} left unchanged.",
                    choice, field
                )));
                return Ok(None);
            }
        };

        let value = self.ui.get_input(&format!("New {}", field))?;
        if value.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some((position, value)))
    }

    // Notes

    fn add_note(&mut self) -> Result<()> {
        let title = self.ui.get_input("Title")?;
        let content = self.ui.get_input("Content")?;
        let tags = self.ui.get_input("Tags, comma separated")?;
        let result = self.api.add_note(&title, &content, &tags);
        self.ui.display_result(&result);
        Ok(())
    }

    fn delete_note(&mut self) -> Result<()> {
        let id_input = self.ui.get_input("ID of the note to delete")?;
        let result = self.api.delete_note(&id_input)?;
        self.ui.display_messages(&result.messages);
        Ok(())
    }

    fn edit_note(&mut self) -> Result<()> {
        let id_input = self.ui.get_input("ID of the note to edit")?;
        let note = self.api.note(&id_input)?.clone();
        self.ui.display_notes(slice::from_ref(&note));

        let edit = NoteEdit {
            title: Some(self.ui.get_input("New title (empty to keep)")?),
            content: Some(self.ui.get_input("New content (empty to keep)")?),
            tags: Some(self.ui.get_input("New tags, comma separated (empty to keep)")?),
        };
        let result = self.api.edit_note(&id_input, &edit)?;
        self.ui.display_result(&result);
        Ok(())
    }

    fn search_by_tag(&mut self) -> Result<()> {
        if let Some(tag) = self.choose_tag("Tag to search for")? {
            let result = self.api.search_notes_by_tag(&tag);
            self.ui.display_result(&result);
        }
        Ok(())
    }

    fn sort_notes(&mut self) -> Result<()> {
        if let Some(tag) = self.choose_tag("Tag to bring to the front")? {
            let result = self.api.sort_notes_by_recency(&tag);
            self.ui.display_result(&result);
        }
        Ok(())
    }

    fn rank_notes(&mut self) -> Result<()> {
        if let Some(tag) = self.choose_tag("Tag to rank by")? {
            let result = self.api.rank_notes_by_tag(&tag);
            self.ui.display_result(&result);
        }
        Ok(())
    }

    /// Lists the tags in use and asks for one; `None` when there are none.
    fn choose_tag(&mut self, prompt: &str) -> Result<Option<String>> {
        let available = self.api.unique_tags();
        self.ui.display_messages(&available.messages);
        if available.tags.is_empty() {
            return Ok(None);
        }
        self.ui.get_input(prompt).map(Some)
    }

    // Prompts

    fn prompt_until_valid<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> std::result::Result<T, ValidationError>,
    ) -> Result<T> {
        loop {
            let input = self.ui.get_input(prompt)?;
            match parse(input.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => self.ui.display_message(&CmdMessage::warning(e.to_string())),
            }
        }
    }

    /// Like `prompt_until_valid`, but empty input means "none".
    fn prompt_optional<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> std::result::Result<T, ValidationError>,
    ) -> Result<Option<T>> {
        loop {
            let input = self.ui.get_input(prompt)?;
            let input = input.trim();
            if input.is_empty() {
                return Ok(None);
            }
            match parse(input) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.ui.display_message(&CmdMessage::warning(e.to_string())),
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.ui.get_input(prompt)?.trim().eq_ignore_ascii_case("y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::BookConfig;
    use crate::store::memory::InMemoryStore;
    use crate::store::Collection;
    use crate::test_utils::{fixtures, ScriptedInterface};

    type TestSession = Session<InMemoryStore, ScriptedInterface>;

    fn session(store: InMemoryStore, inputs: &[&str]) -> TestSession {
        session_with_config(store, BookConfig::default(), inputs)
    }

    fn session_with_config(
        store: InMemoryStore,
        config: BookConfig,
        inputs: &[&str],
    ) -> TestSession {
        Session::new(BookApi::new(store, config), ScriptedInterface::new(inputs))
    }

    /// A store already holding the given contacts, ids 1..
    fn seeded(contacts: &[(&str, &str)]) -> InMemoryStore {
        let mut api = BookApi::new(InMemoryStore::new(), BookConfig::default());
        for (name, phone) in contacts {
            api.add_contact(fixtures::contact(name, phone));
        }
        assert!(!api.save().has_errors());
        api.into_store()
    }

    fn run(mut session: TestSession) -> (BookApi<InMemoryStore>, ScriptedInterface) {
        session.run().unwrap();
        session.into_parts()
    }

    #[test]
    fn quitting_saves_both_collections() {
        let (api, ui) = run(session(InMemoryStore::new(), &["q"]));
        assert!(api.store().has_contacts());
        assert!(api.store().has_notes());
        assert!(ui.has_message(MessageLevel::Success, "Data saved."));
    }

    #[test]
    fn end_of_input_saves_too() {
        let (api, _) = run(session(InMemoryStore::new(), &["c", "add", "Anna"]));
        // the wizard was cut short, so nothing was added, but the save happened
        assert!(api.store().has_contacts());
        assert!(api.book().is_empty());
    }

    #[test]
    fn unknown_options_are_reported() {
        let (_, ui) = run(session(InMemoryStore::new(), &["x", "c", "fly", "q", "q"]));
        assert_eq!(ui.count_level(MessageLevel::Warning), 2);
    }

    #[test]
    fn add_contact_wizard_retries_invalid_values() {
        let inputs = [
            "c",
            "add",
            "",
            "Anna Kowalska",
            "1990-02-30",
            "1990-05-01",
            "123",
            "500500500",
            "",
            "not-an-email",
            "anna@example.com",
            "",
            "n",
            "q",
            "q",
        ];
        let (api, ui) = run(session(InMemoryStore::new(), &inputs));

        let record = api.book().get(1).unwrap();
        assert_eq!(record.name.value(), "Anna Kowalska");
        assert_eq!(record.phones.len(), 1);
        assert_eq!(record.emails[0].value(), "anna@example.com");
        assert_eq!(record.birthday.unwrap().to_string(), "1990-05-01");
        assert!(record.address.is_none());
        assert_eq!(ui.count_level(MessageLevel::Warning), 4);
        assert!(ui.has_message(MessageLevel::Success, "Added contact with ID: 1."));
    }

    #[test]
    fn add_contact_with_address() {
        let inputs = [
            "c", "add", "Bob", "", "", "", "y", "Main St 1", "Gdansk", "80-001", "Poland", "q",
            "q",
        ];
        let (api, _) = run(session(InMemoryStore::new(), &inputs));
        let address = api.book().get(1).unwrap().address.as_ref().unwrap();
        assert_eq!(address.value(), "Main St 1, Gdansk, 80-001, Poland");
    }

    #[test]
    fn find_lists_matches() {
        let store = seeded(&[("Anna", "500500500"), ("Bob", "600600600")]);
        let (_, ui) = run(session(store, &["c", "find", "600", "q", "q"]));
        assert_eq!(ui.shown_contacts.len(), 1);
        assert_eq!(ui.shown_contacts[0][0].name.value(), "Bob");
    }

    #[test]
    fn guided_delete_and_id_reuse() {
        let store = seeded(&[("Anna", ""), ("Annabel", ""), ("Bob", "")]);
        let inputs = ["c", "delete", "anna", "2", "add", "Cleo", "", "", "", "n", "q", "q"];
        let (api, ui) = run(session(store, &inputs));

        assert!(ui.has_message(MessageLevel::Success, "Deleted contact with ID: 2"));
        assert_eq!(api.book().get(2).unwrap().name.value(), "Cleo");
    }

    #[test]
    fn delete_rejects_ids_outside_the_matches() {
        let store = seeded(&[("Anna", ""), ("Bob", "")]);
        let (api, ui) = run(session(store, &["c", "delete", "Anna", "2", "q", "q"]));
        assert!(ui.has_message(MessageLevel::Error, "is not one of the contacts matching"));
        assert_eq!(api.book().len(), 2);
    }

    #[test]
    fn delete_with_non_numeric_id_keeps_going() {
        let store = seeded(&[("Anna", "")]);
        let (api, ui) = run(session(store, &["c", "delete", "Anna", "first", "q", "q"]));
        assert!(ui.has_message(MessageLevel::Error, "not a valid ID"));
        assert_eq!(api.book().len(), 1);
    }

    #[test]
    fn delete_with_no_name_match_asks_nothing_more() {
        let store = seeded(&[("Anna", "")]);
        let (_, ui) = run(session(store, &["c", "delete", "Zed", "q", "q"]));
        assert!(ui.has_message(MessageLevel::Info, "No contacts with a matching name."));
        assert_eq!(ui.remaining_inputs(), 0);
    }

    #[test]
    fn edit_applies_fields_independently() {
        let store = seeded(&[("Anna", "500500500")]);
        let inputs = [
            "c",
            "edit",
            "Anna",
            "1",
            "Anna Nowak",
            "1",
            "12",
            "1991-01-01",
            "q",
            "q",
        ];
        let (api, ui) = run(session(store, &inputs));

        let record = api.book().get(1).unwrap();
        assert_eq!(record.name.value(), "Anna Nowak");
        assert_eq!(record.phones[0].value(), "500500500");
        assert_eq!(record.birthday.unwrap().to_string(), "1991-01-01");
        assert!(ui.has_message(MessageLevel::Warning, "Kept the old phone"));
    }

    #[test]
    fn edit_with_non_numeric_position_skips_only_that_field() {
        let store = seeded(&[("Anna", "500500500")]);
        let inputs = ["c", "edit", "Anna", "1", "", "two", "", "q", "q"];
        let (api, ui) = run(session(store, &inputs));

        assert!(ui.has_message(MessageLevel::Warning, "'two' is not a number"));
        assert!(ui.has_message(MessageLevel::Info, "left unchanged"));
        assert_eq!(api.book().get(1).unwrap().phones[0].value(), "500500500");
    }

    #[test]
    fn show_pages_until_declined() {
        let store = seeded(&[("a", ""), ("b", ""), ("c", ""), ("d", ""), ("e", "")]);
        let config = BookConfig {
            page_size: 2,
            ..Default::default()
        };
        let inputs = ["c", "show", "y", "n", "q", "q"];
        let (_, ui) = run(session_with_config(store, config, &inputs));

        assert_eq!(ui.shown_contacts.len(), 2);
        assert_eq!(ui.shown_contacts[1][0].name.value(), "c");
    }

    #[test]
    fn notes_flow() {
        let inputs = [
            "n", "add", "Groceries", "milk", "home, shop", "add", "Report", "q3", "work", "add",
            "Repairs", "sink", "home, home", "rank", "home", "tag", "work", "tags", "q", "q",
        ];
        let (api, ui) = run(session(InMemoryStore::new(), &inputs));

        let titles: Vec<&str> = api
            .notebook()
            .notes()
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Repairs", "Groceries", "Report"]);
        assert!(ui.has_message(MessageLevel::Info, "Available tags: home, shop, work"));
        let last_listing = ui.shown_notes.last().unwrap();
        assert_eq!(last_listing.len(), 1);
        assert_eq!(last_listing[0].title, "Report");
    }

    #[test]
    fn edit_and_delete_notes() {
        let inputs = [
            "n", "add", "Draft", "text", "a", "edit", "1", "Final", "", "b, c", "delete", "7",
            "q", "q",
        ];
        let (api, ui) = run(session(InMemoryStore::new(), &inputs));

        let note = api.notebook().get(1).unwrap();
        assert_eq!(note.title, "Final");
        assert_eq!(note.content, "text");
        assert_eq!(note.tags, vec!["b", "c"]);
        assert!(ui.has_message(MessageLevel::Error, "no note with ID 7"));
    }

    #[test]
    fn unreadable_file_is_kept_and_session_continues() {
        let store = InMemoryStore::new().with_raw_notes("garbage");
        let inputs = ["n", "show", "add", "fresh", "", "", "q", "q"];
        let (api, ui) = run(session(store, &inputs));

        assert!(ui.has_message(MessageLevel::Error, "Could not load notes"));
        assert!(ui.has_message(MessageLevel::Info, "No notes yet."));
        assert!(ui.has_message(MessageLevel::Warning, "unreadable notes file was kept"));
        assert_eq!(
            api.store().set_aside_snapshot(Collection::Notes),
            Some("garbage")
        );
        let saved = api.store().load_notes().unwrap().unwrap();
        assert_eq!(saved.notes()[0].title, "fresh");
    }

    #[test]
    fn failed_save_is_reported_and_other_collection_is_written() {
        let store = InMemoryStore::new().with_read_only(Collection::Contacts);
        let inputs = ["n", "add", "t", "c", "x", "q", "q", "y"];
        let (api, ui) = run(session(store, &inputs));

        assert!(ui.has_message(MessageLevel::Error, "Could not save contacts"));
        assert!(!ui.has_message(MessageLevel::Success, "Data saved."));
        assert!(api.store().has_notes());
        assert_eq!(api.store().load_notes().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn declining_to_quit_after_failed_save_returns_to_the_menu() {
        let store = InMemoryStore::new().with_read_only(Collection::Notes);
        let inputs = ["q", "n", "c", "q", "q", "y"];
        let (_, ui) = run(session(store, &inputs));

        let asked = ui
            .prompts
            .iter()
            .filter(|p| p.as_str() == QUIT_UNSAVED_PROMPT)
            .count();
        assert_eq!(asked, 2);
        assert_eq!(ui.count_level(MessageLevel::Error), 2);
        assert_eq!(ui.remaining_inputs(), 0);
    }

    #[test]
    fn failed_save_at_end_of_input_does_not_ask() {
        let store = InMemoryStore::new().with_read_only(Collection::Notes);
        let mut session = session(store, &["n"]);
        assert!(session.run().is_ok());
        assert!(!session.ui().prompts.iter().any(|p| p == QUIT_UNSAVED_PROMPT));
    }

    #[test]
    fn tag_flows_list_tags_first_and_skip_when_there_are_none() {
        let (_, ui) = run(session(InMemoryStore::new(), &["n", "sort", "rank", "q", "q"]));
        assert_eq!(ui.count_level(MessageLevel::Info), 2);
        assert!(ui.has_message(MessageLevel::Info, "No tags yet."));
        assert!(!ui.prompts.iter().any(|p| p.starts_with("Tag to")));

        let inputs = ["n", "add", "a", "", "x", "sort", "x", "q", "q"];
        let (_, ui) = run(session(InMemoryStore::new(), &inputs));
        assert!(ui.has_message(MessageLevel::Info, "Available tags: x"));
        assert!(ui.has_message(MessageLevel::Success, "Notes tagged 'x' sorted newest first."));
    }
}
