//! # logkv
//!
//! A minimal persistent key-value store with:
//! - An append-only, line-oriented log for durability
//! - Log replay on startup to rebuild the in-memory index
//! - Last-write-wins semantics
//! - A line-oriented `SET`/`GET`/`EXIT` command interface
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Session (stdin/stdout)                     │
//! │                  one command per line                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Command Dispatcher                           │
//! │          parse → Command → Engine → Response                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │     Log     │ replay → │    Index    │
//!   │  (Append)   │          │  (Upsert)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod wal;
pub mod index;
pub mod protocol;
pub mod engine;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::{Config, SyncStrategy};
pub use engine::Engine;
pub use session::{Dispatcher, ExitReason, Session};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of logkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
