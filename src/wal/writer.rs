//! Log Writer
//!
//! Handles appending records to the log file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SyncStrategy;
use crate::error::Result;

use super::Operation;

/// Writes records to the tail of the log file
pub struct WalWriter {
    /// Path of the log file
    path: PathBuf,

    /// File handle opened in append mode
    file: File,

    /// How often appends are followed by fsync
    sync_strategy: SyncStrategy,

    /// Appends flushed to the OS but not yet fsynced
    unsynced: usize,

    /// Records appended through this writer
    records_written: u64,
}

impl WalWriter {
    /// Open or create a log file for appending
    pub fn open(path: &Path, sync_strategy: SyncStrategy) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            sync_strategy,
            unsynced: 0,
            records_written: 0,
        })
    }

    /// Append one record to the log
    ///
    /// The record is handed to the OS in a single write before this returns,
    /// and fsynced according to the sync strategy. If the write or the fsync
    /// fails, the file is cut back to its previous length and the error is
    /// returned, so a failed append never stays in the log. Records acknowledged
    /// earlier are not touched.
    pub fn append(&mut self, operation: &Operation) -> Result<()> {
        let line = operation.encode();
        let committed_len = self.file.metadata()?.len();

        if let Err(e) = self.file.write_all(&line) {
            self.roll_back(committed_len);
            return Err(e.into());
        }

        let sync_due = match self.sync_strategy {
            SyncStrategy::EveryWrite => true,
            SyncStrategy::EveryNEntries { count } => self.unsynced + 1 >= count,
        };

        if sync_due {
            if let Err(e) = self.sync() {
                self.roll_back(committed_len);
                return Err(e);
            }
        } else {
            self.unsynced += 1;
        }
        self.records_written += 1;

        tracing::trace!(
            "Appended {} bytes for key {:?} to {}",
            line.len(),
            operation.key(),
            self.path.display()
        );

        Ok(())
    }

    /// Cut the file back to `len`, dropping a record that was not acknowledged
    fn roll_back(&mut self, len: u64) {
        if let Err(e) = self.file.set_len(len) {
            tracing::warn!(
                "Failed to roll back failed append in {}: {}",
                self.path.display(),
                e
            );
        }
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.flush()?;
        self.file.sync_data()?;
        self.unsynced = 0;
        Ok(())
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records appended through this writer
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Number of appends not yet fsynced
    pub fn unsynced(&self) -> usize {
        self.unsynced
    }

    /// The configured sync strategy
    pub fn sync_strategy(&self) -> SyncStrategy {
        self.sync_strategy
    }
}
