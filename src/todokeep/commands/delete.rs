use crate::commands::{CmdMessage, CmdResult, SAVE_FAILED};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::model::Todo;
use crate::store::backend::StorageBackend;
use crate::store::todo_store::TodoStore;
use crate::store::trash_store::TrashStore;
use std::collections::HashSet;

use super::helpers::resolve_todos;

/// Move the todos at `indexes` into the recently-deleted log.
pub fn run<B: StorageBackend>(
    store: &TodoStore<B>,
    trash: &TrashStore<B>,
    indexes: &[DisplayIndex],
) -> Result<CmdResult> {
    let todos = store.load();
    let targets: Vec<Todo> = resolve_todos(&todos, indexes)?
        .into_iter()
        .map(|dt| dt.todo)
        .collect();
    Ok(move_to_trash(store, trash, todos, targets))
}

/// Move every completed todo into the recently-deleted log.
pub fn clear_completed<B: StorageBackend>(
    store: &TodoStore<B>,
    trash: &TrashStore<B>,
) -> Result<CmdResult> {
    let todos = store.load();
    let targets: Vec<Todo> = todos.iter().filter(|t| t.completed).cloned().collect();
    if targets.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No completed todos to clear."));
        return Ok(result);
    }
    Ok(move_to_trash(store, trash, todos, targets))
}

// A todo that can't be logged is still deleted; the user is told it won't be
// recoverable. If the live list can't be saved afterwards, the log entries
// are withdrawn so no todo ends up owned by both stores.
fn move_to_trash<B: StorageBackend>(
    store: &TodoStore<B>,
    trash: &TrashStore<B>,
    mut todos: Vec<Todo>,
    targets: Vec<Todo>,
) -> CmdResult {
    let mut result = CmdResult::default();
    let mut messages = Vec::new();
    let mut trashed = Vec::new();
    let already_logged: HashSet<i64> = trash.get_all().iter().map(|e| e.id()).collect();

    for todo in &targets {
        if trash.add(todo) {
            // An id already in the log was a no-op add; rollback must not purge it.
            if !already_logged.contains(&todo.id) {
                trashed.push(todo.id);
            }
            messages.push(CmdMessage::success(format!("Todo deleted: {}", todo.text)));
        } else {
            messages.push(CmdMessage::warning(format!(
                "Todo deleted: {} (could not be added to recently deleted, it cannot be restored)",
                todo.text
            )));
        }
    }

    todos.retain(|t| !targets.iter().any(|target| target.id == t.id));

    if store.save(&todos) {
        result.messages.extend(messages);
        result.affected_todos = targets;
    } else {
        for id in trashed {
            trash.purge(id);
        }
        result.add_message(CmdMessage::error(SAVE_FAILED));
    }
    result
}
