use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single task in the live list.
///
/// Field names are camelCase on the wire so records written by earlier
/// versions of the app decode unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn new(id: i64, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at,
            completed_at: None,
        }
    }

    /// Flips completion. `completed_at` is set when completing and cleared
    /// when reopening.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.completed_at = if self.completed { Some(now) } else { None };
    }
}

/// A todo that sits in the recently-deleted log.
///
/// The original todo is embedded untouched; restoring hands back `todo`
/// and the deletion timestamp stays behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTodo {
    #[serde(flatten)]
    pub todo: Todo,
    pub deleted_at: DateTime<Utc>,
}

impl DeletedTodo {
    pub fn new(todo: Todo, deleted_at: DateTime<Utc>) -> Self {
        Self { todo, deleted_at }
    }

    pub fn id(&self) -> i64 {
        self.todo.id
    }

    pub fn into_todo(self) -> Todo {
        self.todo
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !todo.completed,
            TodoFilter::Completed => todo.completed,
        }
    }
}

impl fmt::Display for TodoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TodoFilter::All => "all",
            TodoFilter::Active => "active",
            TodoFilter::Completed => "completed",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TodoFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(TodoFilter::All),
            "active" => Ok(TodoFilter::Active),
            "completed" | "done" => Ok(TodoFilter::Completed),
            other => Err(format!("Unknown filter: {}", other)),
        }
    }
}

/// Read-only snapshot of what the primary store currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorageStats {
    pub has_user: bool,
    pub user_name: Option<String>,
    pub todos_count: usize,
    pub completed_count: usize,
    pub last_saved: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn toggle_sets_and_clears_completed_at() {
        let mut todo = Todo::new(1, "Buy milk", at(100));
        todo.toggle(at(200));
        assert!(todo.completed);
        assert_eq!(todo.completed_at, Some(at(200)));

        todo.toggle(at(300));
        assert!(!todo.completed);
        assert_eq!(todo.completed_at, None);
        assert_eq!(todo.created_at, at(100));
    }

    #[test]
    fn todo_serializes_with_camel_case_and_omits_missing_completed_at() {
        let todo = Todo::new(42, "Write report", at(0));
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["id"], 42);
        assert_eq!(value["text"], "Write report");
        assert_eq!(value["completed"], false);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("completedAt").is_none());
    }

    #[test]
    fn todo_reads_browser_style_timestamps() {
        let json = r#"{"id":1700000000000,"text":"Walk dog","completed":true,
            "createdAt":"2024-03-01T09:15:00.000Z","completedAt":"2024-03-02T10:00:00.000Z"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.id, 1_700_000_000_000);
        assert!(todo.completed);
        assert!(todo.completed_at.is_some());
    }

    #[test]
    fn deleted_todo_is_flat_on_the_wire() {
        let deleted = DeletedTodo::new(Todo::new(7, "Old task", at(10)), at(20));
        let value = serde_json::to_value(&deleted).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["text"], "Old task");
        assert!(value.get("deletedAt").is_some());
        assert!(value.get("todo").is_none());

        let back: DeletedTodo = serde_json::from_value(value).unwrap();
        assert_eq!(back, deleted);
    }

    #[test]
    fn into_todo_drops_deletion_metadata() {
        let deleted = DeletedTodo::new(Todo::new(7, "Old task", at(10)), at(20));
        let todo = deleted.into_todo();
        let value = serde_json::to_value(&todo).unwrap();
        assert!(value.get("deletedAt").is_none());
    }

    #[test]
    fn filter_matches_completion_state() {
        let open = Todo::new(1, "a", at(0));
        let mut done = Todo::new(2, "b", at(0));
        done.toggle(at(1));

        assert!(TodoFilter::All.matches(&open) && TodoFilter::All.matches(&done));
        assert!(TodoFilter::Active.matches(&open) && !TodoFilter::Active.matches(&done));
        assert!(!TodoFilter::Completed.matches(&open) && TodoFilter::Completed.matches(&done));
    }

    #[test]
    fn filter_parses_names() {
        assert_eq!("Active".parse::<TodoFilter>(), Ok(TodoFilter::Active));
        assert_eq!("done".parse::<TodoFilter>(), Ok(TodoFilter::Completed));
        assert!("pending".parse::<TodoFilter>().is_err());
    }
}
