//! # Command Layer
//!
//! Business logic for every interactive action. Commands take the
//! collections plus already-collected input and return a [`CmdResult`]:
//! the records or notes to show and the messages to report. They never
//! prompt or print.
//!
//! Recoverable failures that abort a whole command (unknown id, non-numeric
//! id) come back as `Err`; failures that only affect one field of an edit
//! come back as warning messages inside an `Ok` result.

use crate::error::{BookError, Result};
use crate::model::{Note, Record};

pub mod contacts;
pub mod notes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<Record>,
    /// Contacts split into display pages, for `show`.
    pub record_pages: Vec<Vec<Record>>,
    pub listed_notes: Vec<Note>,
    pub tags: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

/// Parses a record or note id typed by the user. A leading `ID:` (as shown
/// in listings) is accepted.
pub fn parse_id(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("ID:")
        .or_else(|| trimmed.strip_prefix("id:"))
        .unwrap_or(trimmed)
        .trim();
    digits.parse().map_err(|_| {
        BookError::InputFormat(format!("'{}' is not a valid ID, enter a number", trimmed))
    })
}
