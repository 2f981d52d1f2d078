//! Protocol Module
//!
//! Defines the line-oriented command protocol.
//!
//! ## Request Format
//! One command per line. The first whitespace-delimited token is the command
//! name (case-insensitive); the rest of the line is its argument string.
//!
//! ```text
//! SET <key> <value...>
//! GET <key>
//! EXIT
//! ```
//!
//! ## Response Format
//! Exactly one line per command, except `EXIT` which produces none.
//!
//! | Outcome          | Line                                 |
//! |------------------|--------------------------------------|
//! | SET stored       | `OK`                                 |
//! | GET hit          | the value                            |
//! | GET miss         | `Key not found`                      |
//! | Bad arguments    | `Error: SET requires key and value`  |
//! | Unknown command  | `Unknown command: <CMD>`             |

mod command;
mod response;
mod parser;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use parser::{parse, ParsedLine};
