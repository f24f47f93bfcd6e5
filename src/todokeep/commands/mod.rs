//! # Command Layer
//!
//! Business logic for every operation a client can ask for. This is the
//! orchestration that sits above the two stores: it loads the live list,
//! mutates it, saves it, and passes records between the primary store and
//! the trash store by value.
//!
//! Commands take stores by reference and return [`CmdResult`]. They never
//! print. A store reporting `false` becomes a leveled message; user mistakes
//! (unknown index, empty text) become `Err`.

use crate::config::TodoKeepConfig;
use crate::index::{DisplayDeleted, DisplayTodo};
use crate::model::{StorageStats, Todo};
use crate::store::trash_store::TrashPolicy;

pub mod config;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod purge;
pub mod reset;
pub mod restore;
pub mod status;
pub mod toggle;
pub mod trash;
pub mod update;
pub mod user;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Storage stats plus the trash numbers the primary store can't see.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub stats: StorageStats,
    pub trash_count: usize,
    pub trash_policy: TrashPolicy,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_todos: Vec<Todo>,
    pub listed_todos: Vec<DisplayTodo>,
    pub listed_deleted: Vec<DisplayDeleted>,
    pub user_name: Option<String>,
    pub status: Option<StatusReport>,
    pub config: Option<TodoKeepConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_todos(mut self, todos: Vec<DisplayTodo>) -> Self {
        self.listed_todos = todos;
        self
    }

    pub fn with_listed_deleted(mut self, entries: Vec<DisplayDeleted>) -> Self {
        self.listed_deleted = entries;
        self
    }

    pub fn with_config(mut self, config: TodoKeepConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

pub(crate) const SAVE_FAILED: &str = "Failed to save todos. Your changes were not stored.";
