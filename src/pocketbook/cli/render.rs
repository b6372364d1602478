//! Plain-string rendering of messages, contacts and notes. The console
//! prints what these return.

use super::styles::DIVIDER;
use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;
use pocketbook::commands::{CmdMessage, MessageLevel};
use pocketbook::model::{Note, Record};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const CONTENT_INDENT: &str = "      ";

pub fn render_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

pub fn render_contacts(records: &[Record], today: NaiveDate, width: usize) -> String {
    let divider = DIVIDER.apply_to("-".repeat(width.min(LINE_WIDTH))).to_string();
    records
        .iter()
        .map(|record| record.display_on(today))
        .collect::<Vec<_>>()
        .join(&format!("\n{}\n", divider))
}

/// One header line per note (id, title, tags, age) followed by its content.
pub fn render_notes(notes: &[Note], now: DateTime<Utc>, width: usize) -> String {
    let width = width.min(LINE_WIDTH);
    let mut lines = Vec::new();

    for note in notes {
        let index = format!("{:>3}. ", note.id);
        let tags = if note.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", note.tags.join(", "))
        };
        let heading = format!("{}{}", note.title, tags);
        let age = format_time_ago(note.created_at, now);

        let available = width.saturating_sub(index.width() + TIME_WIDTH);
        let heading = truncate_to_width(&heading, available);
        let padding = available.saturating_sub(heading.width());

        lines.push(format!(
            "{}{}{}{}",
            index.yellow(),
            heading.bold(),
            " ".repeat(padding),
            age.dimmed()
        ));
        for content_line in note.content.lines() {
            lines.push(format!("{}{}", CONTENT_INDENT, content_line));
        }
    }
    lines.join("\n")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pocketbook::model::{Name, Phone};

    fn plain() {
        colored::control::set_override(false);
        console::set_colors_enabled(false);
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // wide characters take two columns each
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let now = Utc::now();
        let rendered = format_time_ago(now - Duration::hours(3), now);
        assert_eq!(rendered.width(), TIME_WIDTH);
        assert!(rendered.trim_start().starts_with("3 hours"));
    }

    #[test]
    fn messages_keep_their_text() {
        plain();
        assert_eq!(render_message(&CmdMessage::error("boom")), "boom");
    }

    #[test]
    fn contacts_are_separated() {
        plain();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut a = Record::new(Name::new("Anna").unwrap());
        a.id = Some(1);
        a.add_phone(Phone::new("500500500").unwrap());
        let mut b = Record::new(Name::new("Bob").unwrap());
        b.id = Some(2);

        let out = render_contacts(&[a, b], today, 10);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID: 1, Name: Anna, Phones: 500500500, Emails: ");
        assert_eq!(lines[1], "----------");
        assert!(lines[2].starts_with("ID: 2, Name: Bob"));
    }

    #[test]
    fn notes_fit_the_line() {
        plain();
        let now = Utc::now();
        let mut note = Note::new(
            4,
            "A rather long title that will not fit".into(),
            "first\nsecond".into(),
            vec!["home".into()],
        );
        note.created_at = now - Duration::minutes(5);

        let out = render_notes(&[note], now, 40);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].width(), 40);
        assert!(lines[0].starts_with("  4. A rather"));
        assert!(lines[0].contains('…'));
        assert_eq!(lines[2], "      second");
    }
}
