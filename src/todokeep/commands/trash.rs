use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::index_deleted;
use crate::store::backend::StorageBackend;
use crate::store::trash_store::TrashStore;

pub fn list<B: StorageBackend>(trash: &TrashStore<B>) -> Result<CmdResult> {
    let listed = index_deleted(trash.get_all());
    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("Recently deleted is empty."));
    }
    Ok(result.with_listed_deleted(listed))
}

/// Drop expired entries now instead of on the next read.
pub fn sweep<B: StorageBackend>(trash: &TrashStore<B>) -> Result<CmdResult> {
    let removed = trash.cleanup_expired();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(match removed {
        0 => "No expired todos.".to_string(),
        1 => "Removed 1 expired todo.".to_string(),
        n => format!("Removed {} expired todos.", n),
    }));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::delete;
    use crate::commands::test_support::Env;
    use crate::index::DisplayIndex;
    use chrono::Duration;

    #[test]
    fn lists_most_recent_first_with_d_indexes() {
        let env = Env::new().with_todos(&["a", "b"]);
        delete::run(&env.todos, &env.trash, &[DisplayIndex::Regular(1)]).unwrap();
        env.clock.advance(Duration::minutes(1));
        delete::run(&env.todos, &env.trash, &[DisplayIndex::Regular(1)]).unwrap();

        let result = list(&env.trash).unwrap();
        let rows: Vec<(String, String)> = result
            .listed_deleted
            .iter()
            .map(|dd| (dd.index.to_string(), dd.entry.todo.text.clone()))
            .collect();
        assert_eq!(
            rows,
            vec![("d1".into(), "b".into()), ("d2".into(), "a".into())]
        );
    }

    #[test]
    fn empty_list_message() {
        let env = Env::new();
        let result = list(&env.trash).unwrap();
        assert!(result.listed_deleted.is_empty());
        assert_eq!(result.messages[0].content, "Recently deleted is empty.");
    }

    #[test]
    fn sweep_reports_removed_count() {
        let env = Env::new().with_todos(&["a", "b"]);
        delete::run(
            &env.todos,
            &env.trash,
            &[DisplayIndex::Regular(1), DisplayIndex::Regular(2)],
        )
        .unwrap();

        assert_eq!(sweep(&env.trash).unwrap().messages[0].content, "No expired todos.");
        env.clock.advance(Duration::days(8));
        assert_eq!(
            sweep(&env.trash).unwrap().messages[0].content,
            "Removed 2 expired todos."
        );
    }
}
