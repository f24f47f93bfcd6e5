use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult, SAVE_FAILED};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::backend::StorageBackend;
use crate::store::todo_store::TodoStore;

use super::helpers::resolve_todos;

pub fn run<B: StorageBackend>(
    store: &TodoStore<B>,
    clock: &dyn Clock,
    indexes: &[DisplayIndex],
) -> Result<CmdResult> {
    let mut todos = store.load();
    let resolved = resolve_todos(&todos, indexes)?;
    let now = clock.now();

    let mut result = CmdResult::default();
    let mut messages = Vec::new();
    for dt in resolved {
        if let Some(todo) = todos.iter_mut().find(|t| t.id == dt.todo.id) {
            todo.toggle(now);
            let state = if todo.completed { "completed" } else { "reopened" };
            messages.push(CmdMessage::success(format!(
                "Todo {} ({}): {}",
                state, dt.index, todo.text
            )));
            result.affected_todos.push(todo.clone());
        }
    }

    if store.save(&todos) {
        result.messages.extend(messages);
    } else {
        result.affected_todos.clear();
        result.add_message(CmdMessage::error(SAVE_FAILED));
    }
    Ok(result)
}
