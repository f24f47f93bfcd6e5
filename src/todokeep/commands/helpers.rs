use crate::error::{Result, TodoKeepError};
use crate::index::{index_deleted, index_todos, DisplayDeleted, DisplayIndex, DisplayTodo};
use crate::model::{DeletedTodo, Todo};
use chrono::{DateTime, Utc};

/// Map display indexes onto the live list. Every index must exist.
pub fn resolve_todos(todos: &[Todo], indexes: &[DisplayIndex]) -> Result<Vec<DisplayTodo>> {
    let indexed = index_todos(todos.to_vec());

    indexes
        .iter()
        .map(|idx| match idx {
            DisplayIndex::Regular(_) => indexed
                .iter()
                .find(|dt| &dt.index == idx)
                .cloned()
                .ok_or_else(|| TodoKeepError::Api(format!("Index {} not found", idx))),
            DisplayIndex::Deleted(_) => Err(TodoKeepError::Api(format!(
                "Index {} refers to a deleted todo; use restore or purge",
                idx
            ))),
        })
        .collect()
}

/// Map `d` indexes onto the trash log as returned by `TrashStore::get_all`.
pub fn resolve_deleted(
    entries: &[DeletedTodo],
    indexes: &[DisplayIndex],
) -> Result<Vec<DisplayDeleted>> {
    let indexed = index_deleted(entries.to_vec());

    indexes
        .iter()
        .map(|idx| match idx {
            DisplayIndex::Deleted(_) => indexed
                .iter()
                .find(|dd| &dd.index == idx)
                .cloned()
                .ok_or_else(|| TodoKeepError::Api(format!("Index {} not found", idx))),
            DisplayIndex::Regular(n) => Err(TodoKeepError::Api(format!(
                "Index {} is not a deleted todo; did you mean d{}?",
                idx, n
            ))),
        })
        .collect()
}

/// Next todo id: the creation time in milliseconds, bumped past the largest
/// existing id so ids stay unique and increasing.
pub fn next_id(todos: &[Todo], now: DateTime<Utc>) -> i64 {
    let stamp = now.timestamp_millis();
    match todos.iter().map(|t| t.id).max() {
        Some(max) if max >= stamp => max + 1,
        _ => stamp,
    }
}

/// Trim user text, rejecting what is left empty.
pub fn clean_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TodoKeepError::Api("Todo text cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_000_000).unwrap()
    }

    #[test]
    fn next_id_uses_timestamp() {
        assert_eq!(next_id(&[], now()), 1_000_000);
        let older = Todo::new(5, "a", now());
        assert_eq!(next_id(&[older], now()), 1_000_000);
    }

    #[test]
    fn next_id_never_collides() {
        let same_ms = Todo::new(1_000_000, "a", now());
        assert_eq!(next_id(&[same_ms], now()), 1_000_001);
        let ahead = Todo::new(2_000_000, "b", now());
        assert_eq!(next_id(&[ahead], now()), 2_000_001);
    }

    #[test]
    fn clean_text_trims_and_rejects_blank() {
        assert_eq!(clean_text("  hi  ").unwrap(), "hi");
        assert!(clean_text("   ").is_err());
    }

    #[test]
    fn resolve_todos_rejects_unknown_and_deleted_indexes() {
        let todos = vec![Todo::new(1, "a", now())];
        assert_eq!(
            resolve_todos(&todos, &[DisplayIndex::Regular(1)]).unwrap()[0]
                .todo
                .id,
            1
        );
        assert!(resolve_todos(&todos, &[DisplayIndex::Regular(2)]).is_err());
        assert!(resolve_todos(&todos, &[DisplayIndex::Deleted(1)]).is_err());
    }

    #[test]
    fn resolve_deleted_rejects_regular_indexes() {
        let entries = vec![DeletedTodo::new(Todo::new(1, "a", now()), now())];
        assert!(resolve_deleted(&entries, &[DisplayIndex::Deleted(1)]).is_ok());
        assert!(resolve_deleted(&entries, &[DisplayIndex::Deleted(2)]).is_err());
        assert!(resolve_deleted(&entries, &[DisplayIndex::Regular(1)]).is_err());
    }
}
