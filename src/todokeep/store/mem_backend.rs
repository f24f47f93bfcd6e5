use super::backend::StorageBackend;
use crate::error::{Result, TodoKeepError};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since todokeep is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
    failing_keys: RefCell<HashSet<String>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the total size of keys plus values, like a browser's per-origin limit.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Fail writes and removals for one key only.
    pub fn fail_writes_for(&self, key: &str) {
        self.failing_keys.borrow_mut().insert(key.to_string());
    }

    fn write_blocked(&self, key: &str) -> bool {
        *self.simulate_write_error.borrow() || self.failing_keys.borrow().contains(key)
    }

    /// Make every read fail, as a disabled storage area would.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    pub fn usage_bytes(&self) -> usize {
        self.items
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageBackend for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(TodoKeepError::Store("Simulated read error".to_string()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.write_blocked(key) {
            return Err(TodoKeepError::Store("Simulated write error".to_string()));
        }

        if let Some(quota) = self.quota_bytes {
            let replaced = self
                .items
                .borrow()
                .get(key)
                .map(|old| key.len() + old.len())
                .unwrap_or(0);
            let in_use = self.usage_bytes() - replaced;
            let needed = key.len() + value.len();
            if in_use + needed > quota {
                return Err(TodoKeepError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available: quota.saturating_sub(in_use),
                });
            }
        }

        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if self.write_blocked(key) {
            return Err(TodoKeepError::Store("Simulated write error".to_string()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
