use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::todo_store::TodoStore;
use crate::store::trash_store::TrashStore;

/// Full app reset: name, todos, backup, last-saved stamp and the trash log.
pub fn run<B: StorageBackend>(store: &TodoStore<B>, trash: &TrashStore<B>) -> Result<CmdResult> {
    store.clear_all_data();
    let mut result = CmdResult::default();
    if trash.clear() {
        result.add_message(CmdMessage::success("All data cleared."));
    } else {
        result.add_message(CmdMessage::warning(
            "Todos and name cleared, but recently deleted could not be emptied.",
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::delete;
    use crate::commands::test_support::Env;
    use crate::index::DisplayIndex;

    #[test]
    fn clears_everything() {
        let env = Env::new().with_todos(&["a", "b"]);
        env.todos.save_user_name("Kim");
        delete::run(&env.todos, &env.trash, &[DisplayIndex::Regular(1)]).unwrap();

        run(&env.todos, &env.trash).unwrap();
        assert!(env.backend.is_empty());
        assert!(env.todos.load().is_empty());
        assert_eq!(env.todos.load_user_name(), None);
        assert_eq!(env.trash.count(), 0);
    }
}
