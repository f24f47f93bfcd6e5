use crate::commands::{CmdMessage, CmdResult, SAVE_FAILED};
use crate::error::Result;
use crate::index::{index_deleted, DisplayIndex};
use crate::model::Todo;
use crate::store::backend::StorageBackend;
use crate::store::todo_store::TodoStore;
use crate::store::trash_store::{RestoreOutcome, TrashStore};

use super::helpers::resolve_deleted;

/// Bring trash entries back into the live list. With no indexes, every
/// entry in the log is restored.
///
/// An entry whose id is already live is left in the log: inserting it
/// would give the list two todos with the same id.
pub fn run<B: StorageBackend>(
    store: &TodoStore<B>,
    trash: &TrashStore<B>,
    indexes: &[DisplayIndex],
) -> Result<CmdResult> {
    let entries = trash.get_all();
    let targets = if indexes.is_empty() {
        index_deleted(entries)
    } else {
        resolve_deleted(&entries, indexes)?
    };

    let mut result = CmdResult::default();
    if targets.is_empty() {
        result.add_message(CmdMessage::info("Nothing to restore."));
        return Ok(result);
    }

    let mut todos = store.load();
    let mut restored: Vec<Todo> = Vec::new();
    for dd in targets {
        if todos.iter().any(|t| t.id == dd.entry.id()) {
            result.add_message(CmdMessage::warning(format!(
                "Not restored ({}): {} is already in your list",
                dd.index, dd.entry.todo.text
            )));
            continue;
        }

        match trash.restore(&dd.entry) {
            RestoreOutcome {
                success: true,
                todo: Some(todo),
            } => {
                insert_in_place(&mut todos, todo.clone());
                restored.push(todo);
            }
            _ => result.add_message(CmdMessage::error(format!(
                "Could not restore ({}): {}",
                dd.index, dd.entry.todo.text
            ))),
        }
    }

    if restored.is_empty() {
        return Ok(result);
    }

    if store.save(&todos) {
        for todo in &restored {
            result.add_message(CmdMessage::success(format!("Todo restored: {}", todo.text)));
        }
        result.affected_todos = restored;
    } else {
        // Hand the todos back so they are not lost; they get a new deletedAt.
        for todo in &restored {
            trash.add(todo);
        }
        result.add_message(CmdMessage::error(SAVE_FAILED));
    }
    Ok(result)
}

// Ids grow with creation time, so ordering by id puts a restored todo back
// where it was.
fn insert_in_place(todos: &mut Vec<Todo>, todo: Todo) {
    let pos = todos
        .iter()
        .position(|t| t.id > todo.id)
        .unwrap_or(todos.len());
    todos.insert(pos, todo);
}
