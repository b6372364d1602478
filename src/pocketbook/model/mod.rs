//! Value types: validated contact fields, the [`Record`] they compose into,
//! and the tagged [`Note`].

mod fields;
mod note;
mod record;

pub use fields::{Address, Birthday, Email, Name, Phone};
pub use note::{parse_tags, Note, NoteId};
pub use record::{Record, RecordId};
