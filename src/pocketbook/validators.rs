//! Lexical checks for the validated contact fields.
//!
//! Validators are total: any input reduces to a boolean, nothing panics.
//! Field constructors in [`crate::model`] call these before accepting a value.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

// `\d` would also match non-ASCII digits.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9}$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$").unwrap());
static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

pub trait Validator {
    fn validate(value: &str) -> bool;
}

/// Exactly nine ASCII digits, no separators or country prefix.
pub struct PhoneValidator;

impl Validator for PhoneValidator {
    fn validate(value: &str) -> bool {
        PHONE_RE.is_match(value)
    }
}

/// `local@host.tld`, permissive about the characters on either side.
pub struct EmailValidator;

impl Validator for EmailValidator {
    fn validate(value: &str) -> bool {
        EMAIL_RE.is_match(value)
    }
}

/// A real calendar date written exactly as `YYYY-MM-DD`.
pub struct BirthdayValidator;

impl BirthdayValidator {
    pub fn parse(value: &str) -> Option<NaiveDate> {
        if !DATE_SHAPE_RE.is_match(value) {
            return None;
        }
        NaiveDate::parse_from_str(value, BIRTHDAY_FORMAT).ok()
    }
}

impl Validator for BirthdayValidator {
    fn validate(value: &str) -> bool {
        Self::parse(value).is_some()
    }
}
