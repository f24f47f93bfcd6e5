use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::backend::StorageBackend;
use crate::store::trash_store::TrashStore;

use super::helpers::resolve_deleted;

/// Permanently remove the trash entries at `indexes`.
pub fn run<B: StorageBackend>(trash: &TrashStore<B>, indexes: &[DisplayIndex]) -> Result<CmdResult> {
    let entries = trash.get_all();
    let targets = resolve_deleted(&entries, indexes)?;

    let mut result = CmdResult::default();
    for dd in targets {
        if trash.purge(dd.entry.id()) {
            result.add_message(CmdMessage::success(format!(
                "Purged ({}): {}",
                dd.index, dd.entry.todo.text
            )));
        } else {
            result.add_message(CmdMessage::error(format!(
                "Could not purge ({}): {}",
                dd.index, dd.entry.todo.text
            )));
        }
    }
    Ok(result)
}

/// Empty the recently-deleted log.
pub fn all<B: StorageBackend>(trash: &TrashStore<B>) -> Result<CmdResult> {
    let count = trash.count();
    let mut result = CmdResult::default();
    if count == 0 {
        result.add_message(CmdMessage::info("Recently deleted is already empty."));
        return Ok(result);
    }

    if trash.clear() {
        result.add_message(CmdMessage::success(format!(
            "Purged {} todo{}.",
            count,
            if count == 1 { "" } else { "s" }
        )));
    } else {
        result.add_message(CmdMessage::error("Could not clear recently deleted."));
    }
    Ok(result)
}
