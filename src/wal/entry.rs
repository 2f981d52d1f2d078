//! Log record definitions
//!
//! Defines the structure of individual log records and their line encoding.

use crate::error::{KvError, Result};

/// Tag written in front of every SET record
pub const SET_TAG: &str = "SET";

/// Separates the tag, the key, and the value
pub const FIELD_DELIMITER: u8 = b' ';

/// Terminates every record
pub const RECORD_TERMINATOR: u8 = b'\n';

/// Operations that can be logged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Set a key to a value
    Set { key: String, value: String },
}

/// A single record read back from the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalRecord {
    /// 1-based line number of the record in the log file
    pub line: u64,

    /// The logged operation
    pub operation: Operation,
}

impl Operation {
    /// Build a SET operation, rejecting keys and values the line format
    /// cannot carry.
    ///
    /// Keys must be non-empty and free of whitespace. Values must be
    /// non-empty and free of line breaks; spaces are allowed.
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let value = value.into();

        if key.is_empty() {
            return Err(KvError::InvalidArgument("key must not be empty".to_string()));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(KvError::InvalidArgument(format!(
                "key {:?} must not contain whitespace",
                key
            )));
        }
        if value.is_empty() {
            return Err(KvError::InvalidArgument("value must not be empty".to_string()));
        }
        if value.contains(|c: char| c == '\n' || c == '\r') {
            return Err(KvError::InvalidArgument(
                "value must not contain line breaks".to_string(),
            ));
        }

        Ok(Operation::Set { key, value })
    }

    /// The key this operation touches
    pub fn key(&self) -> &str {
        match self {
            Operation::Set { key, .. } => key,
        }
    }

    /// Encode as one terminated log line: `SET <key> <value>\n`
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Operation::Set { key, value } => {
                let mut line =
                    Vec::with_capacity(SET_TAG.len() + key.len() + value.len() + 3);
                line.extend_from_slice(SET_TAG.as_bytes());
                line.push(FIELD_DELIMITER);
                line.extend_from_slice(key.as_bytes());
                line.push(FIELD_DELIMITER);
                line.extend_from_slice(value.as_bytes());
                line.push(RECORD_TERMINATOR);
                line
            }
        }
    }

    /// Decode the content of one log line (terminator already removed)
    ///
    /// A single trailing `\r` is tolerated so hand-edited CRLF files still
    /// replay.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| KvError::WalCorruption(format!("record is not valid UTF-8: {}", e)))?;
        let text = text.strip_suffix('\r').unwrap_or(text);

        let (tag, rest) = text
            .split_once(FIELD_DELIMITER as char)
            .ok_or_else(|| KvError::WalCorruption(format!("record {:?} has no fields", text)))?;

        if tag != SET_TAG {
            return Err(KvError::WalCorruption(format!(
                "unknown record tag {:?}",
                tag
            )));
        }

        let (key, value) = rest
            .split_once(FIELD_DELIMITER as char)
            .ok_or_else(|| KvError::WalCorruption(format!("record for {:?} has no value", rest)))?;

        Operation::set(key, value).map_err(|e| KvError::WalCorruption(e.to_string()))
    }
}
