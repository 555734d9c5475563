//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SlotError {
    /// Malformed time or datetime text (non-numeric field, bad separator).
    #[error("Parse error: {0}")]
    Parse(String),

    /// An argument outside its accepted domain (e.g. a meridiem other than am/pm).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The schedule configuration is missing a field or has a wrong type.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SlotError {
    fn from(err: serde_json::Error) -> Self {
        SlotError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
