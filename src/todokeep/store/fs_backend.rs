use super::backend::StorageBackend;
use crate::error::{Result, TodoKeepError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ITEM_EXT: &str = "item";

/// File-backed key-value store: one file per key inside `root`.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write leaves the previous value readable.
pub struct FsBackend {
    root: PathBuf,
    quota_bytes: Option<usize>,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            quota_bytes: None,
        }
    }

    pub fn with_quota(mut self, bytes: Option<usize>) -> Self {
        self.quota_bytes = bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(TodoKeepError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.{}", key, ITEM_EXT)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Bytes held by every item except `skip_key`, counting key and value
    /// like the in-memory backend does.
    fn usage_excluding(&self, skip_key: &str) -> Result<usize> {
        let mut total = 0;
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ITEM_EXT) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if key == skip_key {
                continue;
            }
            total += key.len() + fs::metadata(&path)?.len() as usize;
        }
        Ok(total)
    }
}

impl StorageBackend for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        self.ensure_dir()?;

        if let Some(quota) = self.quota_bytes {
            let in_use = self.usage_excluding(key)?;
            let needed = key.len() + value.len();
            if in_use + needed > quota {
                return Err(TodoKeepError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available: quota.saturating_sub(in_use),
                });
            }
        }

        let tmp_file = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_file, value)?;
        if let Err(e) = fs::rename(&tmp_file, &path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
