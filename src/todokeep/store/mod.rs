//! # Storage Layer
//!
//! Everything todokeep remembers lives in a flat, string-keyed key-value
//! store. The [`backend::StorageBackend`] trait is that store; the two
//! components on top of it own disjoint sets of keys:
//!
//! - [`todo_store::TodoStore`] (primary store): the live todo list and the
//!   user's display name, written with a backup copy on every save.
//! - [`trash_store::TrashStore`]: the recently-deleted log, with lazy expiry,
//!   duplicate suppression and a capacity bound.
//!
//! The stores never read each other's keys. Records move between them only
//! by value, through the command layer.
//!
//! ## Failure Contract
//!
//! Backends return `Result`. The stores are the boundary where errors stop:
//! they log and degrade to `false` or an empty list, so a storage hiccup
//! never takes a client down. The worst case is starting with zero todos.
//!
//! ## Storage Layout
//!
//! ```text
//! userName              raw string
//! todos                 { "todos": [Todo...], "lastSaved": ISO, "version": "1.0" }
//!                       (a bare [Todo...] is still read for older data)
//! todos_backup          same record as `todos`, rewritten on every save
//! lastSave              raw ISO timestamp, diagnostics only
//! recentlyDeletedTodos  [DeletedTodo...]
//! ```
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file per key, atomic writes.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O,
//!   with simulated read/write failures and a byte quota.

pub mod backend;
pub mod codec;
pub mod fs_backend;
pub mod mem_backend;
pub mod todo_store;
pub mod trash_store;

/// Storage keys. Values match what earlier versions wrote so existing data
/// keeps loading.
pub mod keys {
    pub const USER_NAME: &str = "userName";
    pub const TODOS: &str = "todos";
    pub const TODOS_BACKUP: &str = "todos_backup";
    pub const LAST_SAVE: &str = "lastSave";
    pub const RECENTLY_DELETED: &str = "recentlyDeletedTodos";
}
