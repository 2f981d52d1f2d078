//! Response definitions
//!
//! Represents the single line written back for each command.

use std::fmt;

use crate::error::KvError;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
    Error,
}

/// A response to write to the output stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Acknowledgement of a write
    Ok,

    /// Value returned by GET
    Value(String),

    /// GET on a key that was never set
    NotFound,

    /// Unrecognised command token
    UnknownCommand(String),

    /// Any other failure, already rendered as a message
    Error(String),
}

impl Response {
    /// Map an error onto the response the client sees
    pub fn from_error(error: &KvError) -> Self {
        match error {
            KvError::KeyNotFound => Response::NotFound,
            KvError::UnknownCommand(name) => Response::UnknownCommand(name.clone()),
            other => Response::Error(other.to_string()),
        }
    }

    /// Get the status of this response
    pub fn status(&self) -> Status {
        match self {
            Response::Ok | Response::Value(_) => Status::Ok,
            Response::NotFound => Status::NotFound,
            Response::UnknownCommand(_) | Response::Error(_) => Status::Error,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ok => f.write_str("OK"),
            Response::Value(value) => f.write_str(value),
            Response::NotFound => f.write_str("Key not found"),
            Response::UnknownCommand(name) => write!(f, "Unknown command: {}", name),
            Response::Error(message) => write!(f, "Error: {}", message),
        }
    }
}
