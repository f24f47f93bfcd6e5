use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::index_todos;
use crate::model::TodoFilter;
use crate::store::backend::StorageBackend;
use crate::store::todo_store::TodoStore;

/// List the live todos that pass `filter`. Indexes are assigned before
/// filtering so they match the unfiltered list.
pub fn run<B: StorageBackend>(store: &TodoStore<B>, filter: TodoFilter) -> Result<CmdResult> {
    let todos = store.load();
    let total = todos.len();

    let listed: Vec<_> = index_todos(todos)
        .into_iter()
        .filter(|dt| filter.matches(&dt.todo))
        .collect();

    let mut result = CmdResult::default();
    result.user_name = store.load_user_name();
    if listed.is_empty() {
        let message = match (filter, total) {
            (_, 0) => "No todos yet.".to_string(),
            (f, _) => format!("No {} todos found.", f),
        };
        result.add_message(CmdMessage::info(message));
    }
    Ok(result.with_listed_todos(listed))
}
