//! Helpers for driving a session without a terminal.

use crate::commands::{CmdMessage, MessageLevel};
use crate::error::{BookError, Result};
use crate::model::{Name, Note, Phone, Record};
use crate::ui::UserInterface;
use std::collections::VecDeque;

/// Answers prompts from a fixed script and records everything shown.
/// Runs out of answers like a closed stdin does.
#[derive(Debug, Default)]
pub struct ScriptedInterface {
    inputs: VecDeque<String>,
    pub prompts: Vec<String>,
    pub messages: Vec<CmdMessage>,
    pub shown_contacts: Vec<Vec<Record>>,
    pub shown_notes: Vec<Vec<Note>>,
}

impl ScriptedInterface {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn has_message(&self, level: MessageLevel, fragment: &str) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == level && m.content.contains(fragment))
    }

    pub fn count_level(&self, level: MessageLevel) -> usize {
        self.messages.iter().filter(|m| m.level == level).count()
    }
}

impl UserInterface for ScriptedInterface {
    fn display_message(&mut self, message: &CmdMessage) {
        self.messages.push(message.clone());
    }

    fn get_input(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs.pop_front().ok_or(BookError::InputClosed)
    }

    fn display_contacts(&mut self, records: &[Record]) {
        self.shown_contacts.push(records.to_vec());
    }

    fn display_notes(&mut self, notes: &[Note]) {
        self.shown_notes.push(notes.to_vec());
    }
}

pub mod fixtures {
    use super::*;

    /// A contact with the given name and, when non-empty, one phone.
    pub fn contact(name: &str, phone: &str) -> Record {
        let mut record = Record::new(Name::new(name).unwrap());
        if !phone.is_empty() {
            record.add_phone(Phone::new(phone).unwrap());
        }
        record
    }
}
