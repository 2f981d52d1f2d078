//! logkv Binary
//!
//! Runs the command loop over stdin/stdout.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use logkv::{Config, Engine, ExitReason, Session, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// logkv
#[derive(Parser, Debug)]
#[command(name = "logkv")]
#[command(about = "Persistent key-value store with an append-only log")]
#[command(version)]
struct Args {
    /// Log file holding all persisted writes
    #[arg(short, long, default_value = "data.db")]
    data_file: PathBuf,

    /// fsync once every N writes instead of after each one
    #[arg(short, long)]
    sync_every: Option<usize>,
}

fn main() {
    // Initialize tracing/logging. stdout carries protocol responses only.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,logkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("logkv v{}", logkv::VERSION);
    tracing::info!("Data file: {}", args.data_file.display());

    let sync_strategy = match args.sync_every {
        Some(count) => SyncStrategy::EveryNEntries { count },
        None => SyncStrategy::EveryWrite,
    };

    // Build config from args
    let config = Config::builder()
        .log_path(&args.data_file)
        .sync_strategy(sync_strategy)
        .build();

    let engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Engine initialized with {} keys", engine.len());

    // Acknowledged writes are already handed to the OS, so Ctrl+C can exit
    // directly. With --sync-every N, up to N-1 of them may not be fsynced yet.
    if let Err(e) = ctrlc::set_handler(|| {
        tracing::info!("Received Ctrl+C, shutting down");
        std::process::exit(0);
    }) {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), engine);

    match session.run() {
        Ok(ExitReason::Exit) => tracing::debug!("Session ended by EXIT"),
        Ok(reason) => tracing::debug!("Session ended: {:?}", reason),
        Err(e) => tracing::warn!("Session ended with error: {}", e),
    }

    let (engine, _) = session.into_parts();
    if let Err(e) = engine.close() {
        tracing::error!("Failed to sync log on shutdown: {}", e);
    }

    tracing::info!("Stopped");
}
