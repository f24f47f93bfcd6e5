use super::backend::StorageBackend;
use super::codec::{decode_todos, SavedTodos};
use super::keys;
use crate::clock::Clock;
use crate::error::Result;
use crate::model::{StorageStats, Todo};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::rc::Rc;

/// The primary store: live todo list plus the user's display name.
pub struct TodoStore<B: StorageBackend> {
    backend: B,
    clock: Rc<dyn Clock>,
}

impl<B: StorageBackend> TodoStore<B> {
    pub fn with_backend(backend: B, clock: Rc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Persist the whole list, then duplicate the same record into the
    /// backup slot and stamp the last-saved slot.
    ///
    /// Returns false on any write failure. When the primary write fails
    /// nothing has changed on storage.
    pub fn save(&self, todos: &[Todo]) -> bool {
        match self.try_save(todos) {
            Ok(saved_at) => {
                debug!("Saved {} todos at {}", todos.len(), saved_at.to_rfc3339());
                true
            }
            Err(e) => {
                error!("Failed to save todos: {}", e);
                false
            }
        }
    }

    fn try_save(&self, todos: &[Todo]) -> Result<DateTime<Utc>> {
        let record = SavedTodos::new(todos.to_vec(), self.clock.now());
        let encoded = serde_json::to_string(&record)?;

        self.backend.set_item(keys::TODOS, &encoded)?;
        self.backend.set_item(keys::TODOS_BACKUP, &encoded)?;
        self.backend
            .set_item(keys::LAST_SAVE, &record.last_saved.to_rfc3339())?;

        Ok(record.last_saved)
    }

    /// Load the list, falling back to the backup slot and finally to an
    /// empty list. Never fails.
    pub fn load(&self) -> Vec<Todo> {
        if let Some(todos) = self.read_slot(keys::TODOS) {
            return todos;
        }

        if let Some(todos) = self.read_slot(keys::TODOS_BACKUP) {
            info!("Primary todos unusable, loaded {} from backup", todos.len());
            return todos;
        }

        debug!("No todos found, starting fresh");
        Vec::new()
    }

    fn read_slot(&self, key: &str) -> Option<Vec<Todo>> {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read {}: {}", key, e);
                return None;
            }
        };

        let decoded = decode_todos(&raw);
        if decoded.is_none() {
            warn!("Slot {} holds no recognisable todo list", key);
        }
        decoded
    }

    pub fn save_user_name(&self, name: &str) -> bool {
        match self.backend.set_item(keys::USER_NAME, name) {
            Ok(()) => {
                debug!("User name saved");
                true
            }
            Err(e) => {
                error!("Failed to save user name: {}", e);
                false
            }
        }
    }

    /// The stored display name. An empty value counts as no name.
    pub fn load_user_name(&self) -> Option<String> {
        match self.backend.get_item(keys::USER_NAME) {
            Ok(name) => name.filter(|n| !n.is_empty()),
            Err(e) => {
                warn!("Could not read user name: {}", e);
                None
            }
        }
    }

    /// Remove the name, both todo slots and the last-saved stamp. Full
    /// reset only; failures on individual keys are logged and skipped.
    pub fn clear_all_data(&self) {
        for key in [
            keys::USER_NAME,
            keys::TODOS,
            keys::LAST_SAVE,
            keys::TODOS_BACKUP,
        ] {
            if let Err(e) = self.backend.remove_item(key) {
                error!("Failed to remove {}: {}", key, e);
            }
        }
        info!("All app data cleared");
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        let raw = self.backend.get_item(keys::LAST_SAVE).ok().flatten()?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }

    pub fn storage_stats(&self) -> StorageStats {
        let user_name = self.load_user_name();
        let todos = self.load();
        StorageStats {
            has_user: user_name.is_some(),
            user_name,
            todos_count: todos.len(),
            completed_count: todos.iter().filter(|t| t.completed).count(),
            last_saved: self.last_saved(),
        }
    }
}
