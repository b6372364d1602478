use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Note, Record};

/// The console capability the session drives. Implementations decide how
/// things look; the session only decides what is shown and asked.
pub trait UserInterface {
    fn display_message(&mut self, message: &CmdMessage);

    /// Reads one line of input, without the trailing newline. Returns
    /// [`crate::error::BookError::InputClosed`] once input is exhausted.
    fn get_input(&mut self, prompt: &str) -> Result<String>;

    fn display_contacts(&mut self, records: &[Record]);

    fn display_notes(&mut self, notes: &[Note]);

    fn display_messages(&mut self, messages: &[CmdMessage]) {
        for message in messages {
            self.display_message(message);
        }
    }

    /// Messages first, then any listed contacts and notes.
    fn display_result(&mut self, result: &CmdResult) {
        self.display_messages(&result.messages);
        if !result.listed_records.is_empty() {
            self.display_contacts(&result.listed_records);
        }
        if !result.listed_notes.is_empty() {
            self.display_notes(&result.listed_notes);
        }
    }
}
