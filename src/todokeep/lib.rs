//! # todokeep
//!
//! todokeep is a **UI-agnostic todo library** with a crash-tolerant
//! persistence layer and a recoverable "recently deleted" log. The
//! `todokeep` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Parses arguments, formats output, prompts                │
//! │  - The only place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Owns both stores on one shared backend                   │
//! │  - Parses index strings, dispatches to commands             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Business logic; moves todos between the two stores       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - TodoStore: live list with backup slot                    │
//! │  - TrashStore: bounded, expiring recently-deleted log       │
//! │  - StorageBackend: FsBackend (production), MemBackend       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O assumptions in the core
//!
//! From `api.rs` inward, code takes plain arguments, returns
//! `Result<CmdResult>` and never prints or exits. Diagnostics go through
//! the `log` facade; the binary decides where they end up.
//!
//! ## Testing
//!
//! Stores and commands are tested against [`store::mem_backend::MemBackend`]
//! and [`clock::ManualClock`], which can fail writes, enforce a quota and
//! move time forward on demand. The file backend and the binary are covered
//! by the integration tests under `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`store`]: Backends, codecs and the two stores
//! - [`model`]: `Todo`, `DeletedTodo`, filters and stats
//! - [`index`]: Display indexes (`1`, `d1`, ranges)
//! - [`clock`]: Injectable time source
//! - [`config`]: Configuration file
//! - [`error`]: Error types

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod store;
