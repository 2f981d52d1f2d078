//! Log handle
//!
//! The append/replay pair the engine owns.

use std::path::Path;

use crate::config::SyncStrategy;
use crate::error::Result;

use super::{Operation, RecoveryResult, WalRecord, WalRecovery, WalWriter};

/// Append-only log of SET records
pub struct Log {
    writer: WalWriter,
}

impl Log {
    /// Open or create the log at `path`
    pub fn open(path: impl AsRef<Path>, sync_strategy: SyncStrategy) -> Result<Self> {
        let writer = WalWriter::open(path.as_ref(), sync_strategy)?;
        Ok(Self { writer })
    }

    /// Durably append one SET record
    ///
    /// Fails with `InvalidArgument` if the pair cannot be encoded as a line,
    /// and with `Persistence` if the write does not reach the file.
    pub fn append(&mut self, key: &str, value: &str) -> Result<()> {
        let operation = Operation::set(key, value)?;
        self.writer.append(&operation)
    }

    /// Read every record from the start of the log, in insertion order
    pub fn replay(&self) -> Result<(Vec<WalRecord>, RecoveryResult)> {
        WalRecovery::recover(self.writer.path())
    }

    /// Force everything appended so far to disk
    pub fn sync(&mut self) -> Result<()> {
        self.writer.sync()
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }

    pub fn records_written(&self) -> u64 {
        self.writer.records_written()
    }
}
