use thiserror::Error;

/// Why a phone, email, birthday or name was refused at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid phone number '{0}': expected exactly 9 digits, e.g. 123456789")]
    InvalidPhone(String),

    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),

    #[error("Invalid birthday '{0}': expected a calendar date as YYYY-MM-DD")]
    InvalidBirthday(String),

    #[error("Name cannot be empty")]
    EmptyName,
}

#[derive(Error, Debug)]
pub enum BookError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InputFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Input closed")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, BookError>;
