use crate::commands::{CmdResult, StatusReport};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::todo_store::TodoStore;
use crate::store::trash_store::TrashStore;

pub fn run<B: StorageBackend>(store: &TodoStore<B>, trash: &TrashStore<B>) -> Result<CmdResult> {
    let stats = store.storage_stats();
    let mut result = CmdResult::default();
    result.user_name = stats.user_name.clone();
    result.status = Some(StatusReport {
        stats,
        trash_count: trash.count(),
        trash_policy: trash.policy(),
    });
    Ok(result)
}
