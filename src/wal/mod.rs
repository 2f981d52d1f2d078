//! Append-Only Log Module
//!
//! Provides durability guarantees through append-only logging.
//!
//! ## Responsibilities
//! - Append a record before the index is mutated
//! - Flush (and optionally fsync) every append before acknowledging it
//! - Replay every record in insertion order on startup
//! - Skip malformed lines and repair a partial final write
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ SET <key> <value>\n                     │  record 1
//! ├─────────────────────────────────────────┤
//! │ SET <key> <value>\n                     │  record 2
//! ├─────────────────────────────────────────┤
//! │ ...                                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The key is the field after the tag up to the next space; the value is the
//! rest of the line and may itself contain spaces. No header, footer, or
//! checksum.

mod entry;
mod writer;
mod reader;
mod recovery;
mod log;

pub use entry::{Operation, WalRecord, FIELD_DELIMITER, RECORD_TERMINATOR, SET_TAG};
pub use writer::WalWriter;
pub use reader::{ReadEntry, WalIterator, WalReader};
pub use recovery::{RecoveryResult, WalRecovery};
pub use log::Log;
