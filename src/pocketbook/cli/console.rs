use super::render::{render_contacts, render_message, render_notes, LINE_WIDTH};
use super::styles::PROMPT;
use chrono::{Local, Utc};
use console::Term;
use pocketbook::commands::CmdMessage;
use pocketbook::error::{BookError, Result};
use pocketbook::model::{Note, Record};
use pocketbook::ui::UserInterface;
use std::io::{self, BufRead};

/// Prompts on stdout, reads answers line by line from stdin.
pub struct ConsoleInterface {
    term: Term,
}

impl ConsoleInterface {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn width(&self) -> usize {
        self.term
            .size_checked()
            .map(|(_, cols)| cols as usize)
            .unwrap_or(LINE_WIDTH)
    }

    fn print(&self, text: &str) {
        if let Err(e) = self.term.write_line(text) {
            tracing::warn!(error = %e, "could not write to the terminal");
        }
    }
}

impl Default for ConsoleInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for ConsoleInterface {
    fn display_message(&mut self, message: &CmdMessage) {
        self.print(&render_message(message));
    }

    fn get_input(&mut self, prompt: &str) -> Result<String> {
        self.term
            .write_str(&format!("{} ", PROMPT.apply_to(format!("{} >", prompt))))?;
        self.term.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            // keep the shell prompt off our last line
            self.print("");
            return Err(BookError::InputClosed);
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    fn display_contacts(&mut self, records: &[Record]) {
        let today = Local::now().date_naive();
        self.print(&render_contacts(records, today, self.width()));
    }

    fn display_notes(&mut self, notes: &[Note]) {
        self.print(&render_notes(notes, Utc::now(), self.width()));
    }
}
