//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! every todokeep operation, whatever the UI.
//!
//! The facade:
//! - **Owns** the two stores, wired to one shared backend and one clock
//! - **Normalizes inputs** (index strings such as `"3"`, `"d1-d2"` into
//!   [`DisplayIndex`] values)
//! - **Dispatches** to the matching `commands::*` function
//!
//! It holds no business logic and never prints.
//!
//! `TodoKeepApi<B: StorageBackend>` is generic over the backend:
//! - Production: `TodoKeepApi<FsBackend>`
//! - Testing: `TodoKeepApi<MemBackend>`

use crate::clock::Clock;
use crate::commands;
use crate::error::{Result, TodoKeepError};
use crate::index::{parse_indexes, DisplayIndex};
use crate::model::TodoFilter;
use crate::store::backend::StorageBackend;
use crate::store::todo_store::TodoStore;
use crate::store::trash_store::{TrashPolicy, TrashStore};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub struct TodoKeepApi<B: StorageBackend> {
    todos: TodoStore<Rc<B>>,
    trash: TrashStore<Rc<B>>,
    clock: Rc<dyn Clock>,
    data_dir: PathBuf,
}

impl<B: StorageBackend> TodoKeepApi<B> {
    pub fn new(backend: B, clock: Rc<dyn Clock>, policy: TrashPolicy, data_dir: PathBuf) -> Self {
        let backend = Rc::new(backend);
        Self {
            todos: TodoStore::with_backend(Rc::clone(&backend), Rc::clone(&clock)),
            trash: TrashStore::with_backend(backend, Rc::clone(&clock)).with_policy(policy),
            clock,
            data_dir,
        }
    }

    pub fn add_todo(&self, text: &str) -> Result<commands::CmdResult> {
        commands::create::run(&self.todos, self.clock.as_ref(), text)
    }

    pub fn list_todos(&self, filter: TodoFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.todos, filter)
    }

    pub fn toggle_todos<I: AsRef<str>>(&self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::toggle::run(&self.todos, self.clock.as_ref(), &indexes)
    }

    pub fn update_todo(&self, index: &str, text: &str) -> Result<commands::CmdResult> {
        let index = single_index(index)?;
        commands::update::run(&self.todos, &index, text)
    }

    pub fn delete_todos<I: AsRef<str>>(&self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::delete::run(&self.todos, &self.trash, &indexes)
    }

    pub fn clear_completed(&self) -> Result<commands::CmdResult> {
        commands::delete::clear_completed(&self.todos, &self.trash)
    }

    pub fn list_deleted(&self) -> Result<commands::CmdResult> {
        commands::trash::list(&self.trash)
    }

    /// Restore the given `d` indexes; an empty slice restores everything.
    pub fn restore_todos<I: AsRef<str>>(&self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::restore::run(&self.todos, &self.trash, &indexes)
    }

    pub fn purge_deleted<I: AsRef<str>>(&self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::purge::run(&self.trash, &indexes)
    }

    pub fn empty_trash(&self) -> Result<commands::CmdResult> {
        commands::purge::all(&self.trash)
    }

    pub fn sweep_trash(&self) -> Result<commands::CmdResult> {
        commands::trash::sweep(&self.trash)
    }

    pub fn set_user_name(&self, name: &str) -> Result<commands::CmdResult> {
        commands::user::set_name(&self.todos, name)
    }

    pub fn greet(&self) -> Result<commands::CmdResult> {
        commands::user::greet(&self.todos)
    }

    pub fn status(&self) -> Result<commands::CmdResult> {
        commands::status::run(&self.todos, &self.trash)
    }

    pub fn reset(&self) -> Result<commands::CmdResult> {
        commands::reset::run(&self.todos, &self.trash)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    /// Live entries in the recently-deleted log.
    pub fn trash_count(&self) -> usize {
        self.trash.count()
    }

    pub fn trash_policy(&self) -> TrashPolicy {
        self.trash.policy()
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn parse_index_args<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DisplayIndex>> {
    parse_indexes(inputs).map_err(TodoKeepError::Api)
}

fn single_index(input: &str) -> Result<DisplayIndex> {
    let mut parsed = parse_index_args(&[input])?;
    match (parsed.pop(), parsed.is_empty()) {
        (Some(idx), true) => Ok(idx),
        _ => Err(TodoKeepError::Api(format!(
            "Expected a single index, got {}",
            input
        ))),
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, StatusReport};
