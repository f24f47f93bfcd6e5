//! # CLI Layer
//!
//! One possible client of the todokeep library. This is the only code
//! that reads stdin, writes stdout/stderr, installs the logger and picks
//! the data directory.
//!
//! - `setup`: clap argument definitions
//! - `commands`: context setup and per-command handlers
//! - `render`: turns `CmdResult` pieces into terminal text

mod commands;
mod render;
mod setup;

pub use commands::run;
