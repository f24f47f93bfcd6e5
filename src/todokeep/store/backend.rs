use crate::error::Result;
use std::rc::Rc;

/// Abstract interface for the raw key-value medium.
///
/// This mirrors the synchronous string-keyed storage a browser offers:
/// every value is an opaque string and every call completes before it
/// returns. `TodoStore` and `TrashStore` decide *what* goes into which key;
/// the backend only decides *how* it is kept (memory, files).
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) when the key has never been written or was removed.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// On error the previous value MUST still be readable.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

// Both stores share one backend through an `Rc`.
impl<B: StorageBackend + ?Sized> StorageBackend for Rc<B> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
