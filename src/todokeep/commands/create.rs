use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult, SAVE_FAILED};
use crate::error::Result;
use crate::model::Todo;
use crate::store::backend::StorageBackend;
use crate::store::todo_store::TodoStore;

use super::helpers::{clean_text, next_id};

pub fn run<B: StorageBackend>(
    store: &TodoStore<B>,
    clock: &dyn Clock,
    text: &str,
) -> Result<CmdResult> {
    let text = clean_text(text)?;
    let mut todos = store.load();

    let now = clock.now();
    let todo = Todo::new(next_id(&todos, now), text, now);
    todos.push(todo.clone());

    let mut result = CmdResult::default();
    if store.save(&todos) {
        result.add_message(CmdMessage::success(format!(
            "Todo added ({}): {}",
            todos.len(),
            todo.text
        )));
        result.affected_todos.push(todo);
    } else {
        result.add_message(CmdMessage::error(SAVE_FAILED));
    }
    Ok(result)
}
