//! Engine Module
//!
//! The core storage engine that coordinates the log and the index.
//!
//! ## Responsibilities
//! - Rebuild the index from the log on startup
//! - Persist every SET to the log before it becomes visible
//! - Serve GETs from the index alone

use std::path::Path;

use crate::config::Config;
use crate::error::{KvError, Result};
use crate::index::Index;
use crate::protocol::Command;
use crate::wal::{Log, Operation, RecoveryResult};

/// The main storage engine
///
/// ## Ownership
///
/// The engine is the only owner of the index and the log handle. Writes take
/// `&mut self`, so a single caller drives every mutation and no locking is
/// involved. Running two engines against the same log file is unsupported.
///
/// ## Write ordering
///
/// `set` appends to the log first and only then upserts the index. If the
/// append fails the index is untouched; if the process dies between the two
/// steps the record is replayed on the next start.
pub struct Engine {
    /// Append-only log (single source of truth)
    log: Log,

    /// Derived in-memory index
    index: Index,

    /// Statistics from the replay performed at startup
    recovery: RecoveryResult,
}

impl Engine {
    /// Open or create an engine with the given config
    ///
    /// On startup:
    /// 1. Validate the config
    /// 2. Open/create the log file
    /// 3. Replay the log into a fresh index
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let log = Log::open(&config.log_path, config.sync_strategy)?;
        Self::initialize(log)
    }

    /// Open with a log path (convenience method)
    ///
    /// Uses default config with the specified log file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().log_path(path).build();
        Self::open(config)
    }

    /// Build an engine around an open log by replaying it
    ///
    /// Records are applied in log order with upsert, so the last record for a
    /// key decides its value.
    pub fn initialize(log: Log) -> Result<Self> {
        let (records, recovery) = log.replay()?;

        let mut index = Index::new();
        for record in records {
            match record.operation {
                Operation::Set { key, value } => {
                    index.upsert(key, value);
                }
            }
        }

        tracing::info!(
            "Replayed {}: {} records recovered, {} skipped, {} keys{}",
            log.path().display(),
            recovery.records_recovered,
            recovery.records_skipped,
            index.len(),
            if recovery.was_truncated {
                ", partial tail truncated"
            } else {
                ""
            }
        );

        Ok(Self {
            log,
            index,
            recovery,
        })
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers. `Exit` is a session-level
    /// command and leaves the engine untouched.
    pub fn execute(&mut self, command: Command) -> Result<Option<String>> {
        match command {
            Command::Get { key } => self.get(&key).map(|value| Some(value.to_string())),
            Command::Set { key, value } => {
                self.set(&key, &value)?;
                Ok(None)
            }
            Command::Exit => Ok(None),
        }
    }

    /// Set a key to a value
    ///
    /// Steps:
    /// 1. Reject a missing key or value
    /// 2. Append to the log (durability)
    /// 3. Upsert the index (visibility)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() || value.is_empty() {
            return Err(KvError::MissingArgument {
                command: "SET",
                expected: "key and value",
            });
        }

        if let Err(e) = self.log.append(key, value) {
            if let KvError::Persistence(ref io_err) = e {
                tracing::error!("Failed to persist SET for key {:?}: {}", key, io_err);
            }
            return Err(e);
        }

        let inserted = self.index.upsert(key, value);
        tracing::debug!(
            "SET {:?} ({})",
            key,
            if inserted { "new key" } else { "overwrite" }
        );

        Ok(())
    }

    /// Get the current value of a key
    pub fn get(&self, key: &str) -> Result<&str> {
        if key.is_empty() {
            return Err(KvError::MissingArgument {
                command: "GET",
                expected: "a key",
            });
        }

        self.index.lookup(key).ok_or(KvError::KeyNotFound)
    }

    /// Close the engine gracefully
    ///
    /// Syncs any appends the sync strategy has not yet fsynced.
    pub fn close(mut self) -> Result<()> {
        self.log.sync()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get the log file path
    pub fn log_path(&self) -> &Path {
        self.log.path()
    }

    /// Statistics from the startup replay
    pub fn recovery(&self) -> &RecoveryResult {
        &self.recovery
    }

    /// Read-only view of the index
    pub fn index(&self) -> &Index {
        &self.index
    }
}
