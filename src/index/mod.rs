//! Index Module
//!
//! In-memory map from each key to its most recently written value.
//!
//! ## Responsibilities
//! - Point lookup by key
//! - Upsert with last-write-wins semantics
//! - Track approximate size in bytes
//!
//! The index is never persisted. It is derived entirely from the log and
//! rebuilt by replay on every startup.
//!
//! ## Data Structure Choice
//! Entries live in a `Vec` in first-insertion order, with a `HashMap` from key
//! to slot for O(1) lookup. There is no deletion, so slots never move.

mod table;

pub use table::{Index, IndexIter};

/// A key/value pair as stored in the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
