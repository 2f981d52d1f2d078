//! Log Reader
//!
//! Handles reading records from the log file, one line at a time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

use super::{Operation, WalRecord, RECORD_TERMINATOR};

/// One line of the log, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEntry {
    /// A complete, well-formed record
    Record(WalRecord),

    /// A complete line holding nothing but whitespace
    Blank { line: u64 },

    /// A complete line that does not decode as a record
    Malformed { line: u64, reason: String },

    /// Bytes after the last terminator (an interrupted append)
    Partial { offset: u64, len: u64 },
}

/// Reads records from the log file
pub struct WalReader {
    /// Buffered file handle
    reader: BufReader<File>,

    /// Number of lines consumed so far
    line: u64,

    /// Byte offset just past the last line consumed
    offset: u64,

    /// Scratch buffer reused across lines
    buf: Vec<u8>,
}

impl WalReader {
    /// Open a log file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;

        Ok(Self {
            reader: BufReader::new(file),
            line: 0,
            offset: 0,
            buf: Vec::new(),
        })
    }

    /// Read the next line from the log
    ///
    /// Returns `Ok(None)` at end of file. Only I/O failures are errors;
    /// undecodable lines come back as [`ReadEntry::Malformed`].
    pub fn next_entry(&mut self) -> Result<Option<ReadEntry>> {
        self.buf.clear();
        let read = self.reader.read_until(RECORD_TERMINATOR, &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }

        let start = self.offset;
        self.offset += read as u64;

        if self.buf.last() != Some(&RECORD_TERMINATOR) {
            return Ok(Some(ReadEntry::Partial {
                offset: start,
                len: read as u64,
            }));
        }

        self.line += 1;
        let content = &self.buf[..self.buf.len() - 1];

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Some(ReadEntry::Blank { line: self.line }));
        }

        let entry = match Operation::decode(content) {
            Ok(operation) => ReadEntry::Record(WalRecord {
                line: self.line,
                operation,
            }),
            Err(e) => ReadEntry::Malformed {
                line: self.line,
                reason: e.to_string(),
            },
        };

        Ok(Some(entry))
    }

    /// Byte offset just past the last complete or partial line read
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Iterate over all remaining lines
    pub fn entries(self) -> WalIterator {
        WalIterator {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over log lines
pub struct WalIterator {
    reader: WalReader,
    done: bool,
}

impl Iterator for WalIterator {
    type Item = Result<ReadEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                // An I/O error leaves the read position unknown
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
