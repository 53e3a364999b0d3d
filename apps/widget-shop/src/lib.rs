//! # Widget Shop Library
//!
//! Core library for the Widget Shop terminal application.
//! This is the main entry point that wires state together and runs the shell.
//!
//! ## Module Organization
//! ```text
//! widget_shop_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration state
//! │   ├── catalog.rs  ◄─── Catalog source and reload
//! │   └── cart.rs     ◄─── Cart session and order confirmation
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Product listing commands
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── order.rs    ◄─── Order placement
//! ├── shell.rs        ◄─── Line parser and text rendering
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::io;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shell::Shell;
use state::{CatalogState, ConfigState};

/// Runs the shop on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, writing to stderr             │
/// │     • Default: WARN, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • WIDGET_* environment variables over defaults                      │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • Built-in widgets or WIDGET_CATALOG_PATH                           │
/// │     • Failure leaves the catalog empty, startup continues               │
/// │                                                                         │
/// │  4. Run Shell ────────────────────────────────────────────────────────► │
/// │     • Empty cart, read commands until quit / EOF                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let config = ConfigState::from_env().context("invalid configuration")?;
    info!(store = %config.store_name, "Starting Widget Shop");

    let catalog = CatalogState::load(&config);
    let mut shell = Shell::new(config, catalog);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell
        .run(stdin.lock(), &mut stdout)
        .context("terminal I/O failed")?;

    info!("Widget Shop stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command invocation
/// - `RUST_LOG=widget_shop_lib=info` - Startup and order events only
/// - Default: WARN level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
