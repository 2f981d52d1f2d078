//! Log Recovery
//!
//! Rebuilds the ordered record sequence from the log on startup.

use std::fs::OpenOptions;
use std::path::Path;

use crate::error::Result;

use super::{ReadEntry, WalReader, WalRecord};

/// Handles log replay after a restart or crash
pub struct WalRecovery;

/// Result of a recovery operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Number of records successfully recovered
    pub records_recovered: u64,

    /// Number of complete but malformed lines skipped
    pub records_skipped: u64,

    /// Size of the unterminated tail, if any (0 when the log ends cleanly)
    pub partial_tail_bytes: u64,

    /// Whether the log was truncated (partial tail removed)
    pub was_truncated: bool,
}

impl RecoveryResult {
    /// True when every line decoded and the log ended on a terminator
    pub fn is_clean(&self) -> bool {
        self.records_skipped == 0 && self.partial_tail_bytes == 0
    }
}

/// Outcome of a read-only pass over the log
struct Scan {
    records: Vec<WalRecord>,
    result: RecoveryResult,
    /// Length of the log up to and including the last terminator
    valid_len: u64,
}

impl WalRecovery {
    /// Recover records from a log file
    ///
    /// This will:
    /// 1. Read every line in order
    /// 2. Skip blank and malformed lines
    /// 3. Truncate an unterminated tail so later appends start a fresh line
    /// 4. Return all valid records in order
    ///
    /// A missing file recovers to an empty sequence.
    pub fn recover(path: &Path) -> Result<(Vec<WalRecord>, RecoveryResult)> {
        let Some(mut scan) = Self::scan(path)? else {
            return Ok((Vec::new(), RecoveryResult::default()));
        };

        if scan.result.partial_tail_bytes > 0 {
            tracing::warn!(
                "Dropping {} bytes of partial record at end of {}",
                scan.result.partial_tail_bytes,
                path.display()
            );

            let file = OpenOptions::new().write(true).open(path)?;
            file.set_len(scan.valid_len)?;
            file.sync_all()?;
            scan.result.was_truncated = true;
        }

        Ok((scan.records, scan.result))
    }

    /// Verify integrity of a log file without modifying it
    pub fn verify(path: &Path) -> Result<RecoveryResult> {
        Ok(Self::scan(path)?.map(|scan| scan.result).unwrap_or_default())
    }

    fn scan(path: &Path) -> Result<Option<Scan>> {
        if !path.exists() {
            tracing::debug!("No log at {}, nothing to replay", path.display());
            return Ok(None);
        }

        let mut reader = WalReader::open(path)?;
        let mut records = Vec::new();
        let mut result = RecoveryResult::default();
        let mut valid_len = 0;

        while let Some(entry) = reader.next_entry()? {
            match entry {
                ReadEntry::Record(record) => {
                    result.records_recovered += 1;
                    records.push(record);
                }
                ReadEntry::Blank { .. } => {}
                ReadEntry::Malformed { line, reason } => {
                    tracing::warn!(
                        "Skipping malformed record at {}:{}: {}",
                        path.display(),
                        line,
                        reason
                    );
                    result.records_skipped += 1;
                }
                ReadEntry::Partial { len, .. } => {
                    result.partial_tail_bytes = len;
                    continue;
                }
            }
            valid_len = reader.offset();
        }

        Ok(Some(Scan {
            records,
            result,
            valid_len,
        }))
    }
}
