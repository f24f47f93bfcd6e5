use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TodoKeepError};
use crate::store::backend::StorageBackend;
use crate::store::todo_store::TodoStore;

pub fn set_name<B: StorageBackend>(store: &TodoStore<B>, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TodoKeepError::Api("Name cannot be empty".into()));
    }

    let mut result = CmdResult::default();
    if store.save_user_name(name) {
        result.user_name = Some(name.to_string());
        result.add_message(CmdMessage::success(format!("Nice to meet you, {}!", name)));
    } else {
        result.add_message(CmdMessage::error("Failed to save your name."));
    }
    Ok(result)
}

pub fn greet<B: StorageBackend>(store: &TodoStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.user_name = store.load_user_name();
    if result.user_name.is_none() {
        result.add_message(CmdMessage::info("No name set yet."));
    }
    Ok(result)
}
