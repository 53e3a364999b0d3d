//! # Widget Shop Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs ────► widget_shop_lib::run()                                   │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, catalog, shell loop                     │
//! │                                                                         │
//! │  stdin  ────► commands    stdout ◄──── rendered cart    stderr ◄── logs │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    widget_shop_lib::run()
}
