use super::fields::{Address, Birthday, Email, Name, Phone};
use crate::error::{BookError, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type RecordId = u32;

/// One contact. The id is assigned by [`crate::address_book::AddressBook`],
/// never by the caller; a standalone record has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: Option<RecordId>,
    pub name: Name,
    pub phones: Vec<Phone>,
    pub emails: Vec<Email>,
    pub birthday: Option<Birthday>,
    pub address: Option<Address>,
}

impl Record {
    pub fn new(name: Name) -> Self {
        Self {
            id: None,
            name,
            phones: Vec::new(),
            emails: Vec::new(),
            birthday: None,
            address: None,
        }
    }

    pub fn with_birthday(mut self, birthday: Birthday) -> Self {
        self.birthday = Some(birthday);
        self
    }

    pub fn edit_name(&mut self, name: Name) {
        self.name = name;
    }

    pub fn set_birthday(&mut self, birthday: Birthday) {
        self.birthday = Some(birthday);
    }

    pub fn set_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Appends without de-duplication.
    pub fn add_phone(&mut self, phone: Phone) {
        self.phones.push(phone);
    }

    /// Removes the first equal phone.
    pub fn remove_phone(&mut self, phone: &Phone) -> Result<()> {
        let pos = self
            .phones
            .iter()
            .position(|p| p == phone)
            .ok_or_else(|| BookError::NotFound(format!("phone {}", phone)))?;
        self.phones.remove(pos);
        Ok(())
    }

    /// Remove-then-add: a missing `old` fails and nothing is added.
    pub fn edit_phone(&mut self, old: &Phone, new: Phone) -> Result<()> {
        self.remove_phone(old)?;
        self.add_phone(new);
        Ok(())
    }

    pub fn add_email(&mut self, email: Email) {
        self.emails.push(email);
    }

    pub fn remove_email(&mut self, email: &Email) -> Result<()> {
        let pos = self
            .emails
            .iter()
            .position(|e| e == email)
            .ok_or_else(|| BookError::NotFound(format!("email {}", email)))?;
        self.emails.remove(pos);
        Ok(())
    }

    pub fn edit_email(&mut self, old: &Email, new: Email) -> Result<()> {
        self.remove_email(old)?;
        self.add_email(new);
        Ok(())
    }

    /// Whole days from `today` until the next occurrence of the birthday,
    /// `Some(0)` when it is today and `None` when no birthday is recorded.
    ///
    /// A Feb 29 birthday is observed on Feb 28 in non-leap years.
    pub fn days_to_birthday(&self, today: NaiveDate) -> Option<i64> {
        let date = self.birthday?.date();
        let mut next = anniversary_in(date, today.year());
        if next < today {
            next = anniversary_in(date, today.year() + 1);
        }
        Some((next - today).num_days())
    }

    pub fn days_to_birthday_from_now(&self) -> Option<i64> {
        self.days_to_birthday(Local::now().date_naive())
    }

    /// Renders against an explicit date so the output is reproducible.
    pub fn display_on(&self, today: NaiveDate) -> String {
        let id = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let phones = join(&self.phones);
        let emails = join(&self.emails);

        let mut out = format!(
            "ID: {}, Name: {}, Phones: {}, Emails: {}",
            id, self.name, phones, emails
        );
        if let Some(birthday) = &self.birthday {
            out.push_str(&format!(", Birthday: {}", birthday));
        }
        if let Some(days) = self.days_to_birthday(today) {
            out.push_str(&format!(", Days to birthday: {}", days));
        }
        if let Some(address) = &self.address {
            out.push_str(&format!("\nAddress: {}", address));
        }
        out
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_on(Local::now().date_naive()))
    }
}

fn anniversary_in(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year)
        // Only Feb 29 can fail to exist in another year.
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
