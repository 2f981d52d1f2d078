//! Command definitions
//!
//! Represents commands read from the input stream.

use crate::error::{KvError, Result};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Set,
    Get,
    Exit,
}

impl CommandType {
    /// Recognise a command token, ignoring ASCII case
    pub fn from_token(token: &str) -> Option<Self> {
        [CommandType::Set, CommandType::Get, CommandType::Exit]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(token))
    }

    /// Canonical (uppercase) spelling of the command
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Set => "SET",
            CommandType::Get => "GET",
            CommandType::Exit => "EXIT",
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set a key to a value
    Set { key: String, value: String },

    /// Get the value of a key
    Get { key: String },

    /// End the session
    Exit,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Set { .. } => CommandType::Set,
            Command::Get { .. } => CommandType::Get,
            Command::Exit => CommandType::Exit,
        }
    }

    /// Build a typed command from a command token and its argument string
    ///
    /// - `SET`: the first whitespace-delimited field is the key, the rest
    ///   (leading whitespace removed) is the value
    /// - `GET`: the trimmed argument string is the key
    /// - `EXIT`: arguments are ignored
    pub fn from_parts(name: &str, args: &str) -> Result<Self> {
        match CommandType::from_token(name) {
            Some(CommandType::Set) => Self::parse_set(args),
            Some(CommandType::Get) => Self::parse_get(args),
            Some(CommandType::Exit) => Ok(Command::Exit),
            None => Err(KvError::UnknownCommand(name.to_ascii_uppercase())),
        }
    }

    fn parse_set(args: &str) -> Result<Self> {
        let (key, value) = args
            .trim()
            .split_once(char::is_whitespace)
            .ok_or(KvError::MissingArgument {
                command: "SET",
                expected: "key and value",
            })?;

        Ok(Command::Set {
            key: key.to_string(),
            value: value.trim_start().to_string(),
        })
    }

    fn parse_get(args: &str) -> Result<Self> {
        let key = args.trim();
        if key.is_empty() {
            return Err(KvError::MissingArgument {
                command: "GET",
                expected: "a key",
            });
        }

        Ok(Command::Get {
            key: key.to_string(),
        })
    }
}
