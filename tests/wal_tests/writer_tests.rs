//! Tests for the log writer
//!
//! These tests verify:
//! - Appending records in the line format
//! - Appends land after existing content
//! - Sync strategies (EveryWrite, EveryNEntries)
//! - The `Log` handle: append + replay

use std::fs;
use std::path::PathBuf;

use logkv::config::SyncStrategy;
use logkv::wal::{Log, Operation, WalWriter};
use logkv::KvError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_log() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("test.db");
    (temp_dir, log_path)
}

fn set(key: &str, value: &str) -> Operation {
    Operation::set(key, value).unwrap()
}

// =============================================================================
// Basic Writing Tests
// =============================================================================

#[test]
fn test_open_creates_file() {
    let (_temp, log_path) = setup_temp_log();

    let _writer = WalWriter::open(&log_path, SyncStrategy::EveryWrite).unwrap();

    assert!(log_path.exists());
    assert_eq!(fs::metadata(&log_path).unwrap().len(), 0);
}

#[test]
fn test_write_single_record() {
    let (_temp, log_path) = setup_temp_log();

    let mut writer = WalWriter::open(&log_path, SyncStrategy::EveryWrite).unwrap();
    writer.append(&set("key1", "value1")).unwrap();

    assert_eq!(fs::read(&log_path).unwrap(), b"SET key1 value1\n");
    assert_eq!(writer.records_written(), 1);
}

#[test]
fn test_write_multiple_records_in_order() {
    let (_temp, log_path) = setup_temp_log();

    let mut writer = WalWriter::open(&log_path, SyncStrategy::EveryWrite).unwrap();
    writer.append(&set("a", "1")).unwrap();
    writer.append(&set("b", "2")).unwrap();
    writer.append(&set("a", "3")).unwrap();

    assert_eq!(fs::read(&log_path).unwrap(), b"SET a 1\nSET b 2\nSET a 3\n");
    assert_eq!(writer.records_written(), 3);
}

#[test]
fn test_reopen_appends_after_existing_records() {
    let (_temp, log_path) = setup_temp_log();

    {
        let mut writer = WalWriter::open(&log_path, SyncStrategy::EveryWrite).unwrap();
        writer.append(&set("a", "1")).unwrap();
    }
    {
        let mut writer = WalWriter::open(&log_path, SyncStrategy::EveryWrite).unwrap();
        assert_eq!(writer.records_written(), 0);
        writer.append(&set("b", "2")).unwrap();
    }

    assert_eq!(fs::read(&log_path).unwrap(), b"SET a 1\nSET b 2\n");
}

#[test]
fn test_append_is_visible_without_close() {
    let (_temp, log_path) = setup_temp_log();

    let mut writer = WalWriter::open(&log_path, SyncStrategy::EveryNEntries { count: 100 })
        .unwrap();
    writer.append(&set("k", "v")).unwrap();

    // Flushed to the OS even though no fsync has happened yet
    assert_eq!(fs::read(&log_path).unwrap(), b"SET k v\n");
}

// =============================================================================
// Sync Strategy Tests
// =============================================================================

#[test]
fn test_every_write_leaves_nothing_unsynced() {
    let (_temp, log_path) = setup_temp_log();

    let mut writer = WalWriter::open(&log_path, SyncStrategy::EveryWrite).unwrap();
    writer.append(&set("a", "1")).unwrap();
    writer.append(&set("b", "2")).unwrap();

    assert_eq!(writer.unsynced(), 0);
    assert_eq!(writer.sync_strategy(), SyncStrategy::EveryWrite);
}

#[test]
fn test_every_n_entries_batches_syncs() {
    let (_temp, log_path) = setup_temp_log();

    let mut writer =
        WalWriter::open(&log_path, SyncStrategy::EveryNEntries { count: 3 }).unwrap();

    writer.append(&set("a", "1")).unwrap();
    writer.append(&set("b", "2")).unwrap();
    assert_eq!(writer.unsynced(), 2);

    writer.append(&set("c", "3")).unwrap();
    assert_eq!(writer.unsynced(), 0);

    writer.append(&set("d", "4")).unwrap();
    assert_eq!(writer.unsynced(), 1);
}

#[test]
fn test_explicit_sync_resets_counter() {
    let (_temp, log_path) = setup_temp_log();

    let mut writer =
        WalWriter::open(&log_path, SyncStrategy::EveryNEntries { count: 10 }).unwrap();
    writer.append(&set("a", "1")).unwrap();
    writer.sync().unwrap();

    assert_eq!(writer.unsynced(), 0);
}

// =============================================================================
// Log Handle Tests
// =============================================================================

#[test]
fn test_log_append_then_replay() {
    let (_temp, log_path) = setup_temp_log();

    let mut log = Log::open(&log_path, SyncStrategy::EveryWrite).unwrap();
    log.append("a", "1").unwrap();
    log.append("b", "two words").unwrap();

    let (records, result) = log.replay().unwrap();

    assert_eq!(result.records_recovered, 2);
    assert_eq!(records[0].operation, set("a", "1"));
    assert_eq!(records[1].operation, set("b", "two words"));
    assert_eq!(log.records_written(), 2);
    assert_eq!(log.path(), log_path.as_path());
}

#[test]
fn test_log_rejects_unencodable_pair_without_writing() {
    let (_temp, log_path) = setup_temp_log();

    let mut log = Log::open(&log_path, SyncStrategy::EveryWrite).unwrap();
    let err = log.append("bad key", "v").unwrap_err();

    assert!(matches!(err, KvError::InvalidArgument(_)));
    assert_eq!(fs::metadata(&log_path).unwrap().len(), 0);
    assert_eq!(log.records_written(), 0);
}

#[test]
fn test_log_appends_after_repaired_tail() {
    let (_temp, log_path) = setup_temp_log();
    fs::write(&log_path, b"SET a 1\nSET b 2").unwrap();

    let mut log = Log::open(&log_path, SyncStrategy::EveryWrite).unwrap();
    let (records, result) = log.replay().unwrap();
    assert_eq!(records.len(), 1);
    assert!(result.was_truncated);

    log.append("c", "3").unwrap();

    assert_eq!(fs::read(&log_path).unwrap(), b"SET a 1\nSET c 3\n");
}
