use crate::commands::{CmdMessage, CmdResult, SAVE_FAILED};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::backend::StorageBackend;
use crate::store::todo_store::TodoStore;

use super::helpers::{clean_text, resolve_todos};

/// Replace the text of one todo. Everything else about it stays.
pub fn run<B: StorageBackend>(
    store: &TodoStore<B>,
    index: &DisplayIndex,
    text: &str,
) -> Result<CmdResult> {
    let text = clean_text(text)?;
    let mut todos = store.load();
    let target = resolve_todos(&todos, std::slice::from_ref(index))?.remove(0);

    let mut result = CmdResult::default();
    let Some(todo) = todos.iter_mut().find(|t| t.id == target.todo.id) else {
        return Ok(result);
    };
    if todo.text == text {
        result.add_message(CmdMessage::info("Nothing changed."));
        return Ok(result);
    }
    todo.text = text;
    let updated = todo.clone();

    if store.save(&todos) {
        result.add_message(CmdMessage::success(format!(
            "Todo updated ({}): {}",
            index, updated.text
        )));
        result.affected_todos.push(updated);
    } else {
        result.add_message(CmdMessage::error(SAVE_FAILED));
    }
    Ok(result)
}
