use crate::error::{Result, TodoKeepError};
use crate::store::trash_store::TrashPolicy;
use chrono::Duration;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TRASH_CAPACITY: usize = 50;
const DEFAULT_TRASH_RETENTION_DAYS: i64 = 7;

pub const CONFIG_KEYS: &[&str] = &["trash-capacity", "trash-retention-days", "storage-quota-bytes"];

/// Configuration for todokeep, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoKeepConfig {
    /// Maximum number of entries kept in the recently-deleted log
    #[serde(default = "default_trash_capacity")]
    pub trash_capacity: usize,

    /// Days a deleted todo stays recoverable
    #[serde(default = "default_trash_retention_days")]
    pub trash_retention_days: i64,

    /// Total bytes the key-value store may hold. Unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_quota_bytes: Option<usize>,
}

fn default_trash_capacity() -> usize {
    DEFAULT_TRASH_CAPACITY
}

fn default_trash_retention_days() -> i64 {
    DEFAULT_TRASH_RETENTION_DAYS
}

impl Default for TodoKeepConfig {
    fn default() -> Self {
        Self {
            trash_capacity: DEFAULT_TRASH_CAPACITY,
            trash_retention_days: DEFAULT_TRASH_RETENTION_DAYS,
            storage_quota_bytes: None,
        }
    }
}

impl TodoKeepConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: TodoKeepConfig = serde_json::from_str(&content)?;
        config.sanitize();
        Ok(config)
    }

    /// Replace out-of-range values from a hand-edited file with defaults.
    fn sanitize(&mut self) {
        if self.trash_capacity == 0 {
            warn!("trash_capacity must be positive, using {}", DEFAULT_TRASH_CAPACITY);
            self.trash_capacity = DEFAULT_TRASH_CAPACITY;
        }
        if retention_from_days(self.trash_retention_days).is_none() {
            warn!(
                "trash_retention_days {} is out of range, using {}",
                self.trash_retention_days, DEFAULT_TRASH_RETENTION_DAYS
            );
            self.trash_retention_days = DEFAULT_TRASH_RETENTION_DAYS;
        }
        if self.storage_quota_bytes == Some(0) {
            warn!("storage_quota_bytes must be positive, treating as unlimited");
            self.storage_quota_bytes = None;
        }
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn trash_policy(&self) -> TrashPolicy {
        let defaults = TrashPolicy::default();
        let capacity = if self.trash_capacity == 0 {
            warn!("trash_capacity must be positive, using {}", defaults.capacity);
            defaults.capacity
        } else {
            self.trash_capacity
        };
        let retention = retention_from_days(self.trash_retention_days).unwrap_or_else(|| {
            warn!(
                "trash_retention_days {} is out of range, using the default",
                self.trash_retention_days
            );
            defaults.retention
        });
        TrashPolicy {
            capacity,
            retention,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "trash-capacity" => Some(self.trash_capacity.to_string()),
            "trash-retention-days" => Some(self.trash_retention_days.to_string()),
            "storage-quota-bytes" => Some(
                self.storage_quota_bytes
                    .map(|q| q.to_string())
                    .unwrap_or_else(|| "unlimited".to_string()),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "trash-capacity" => {
                let capacity = parse_positive(key, value)?;
                self.trash_capacity = capacity;
            }
            "trash-retention-days" => {
                let days = value
                    .parse::<i64>()
                    .ok()
                    .filter(|d| retention_from_days(*d).is_some())
                    .ok_or_else(|| {
                        TodoKeepError::Config(format!(
                            "{} must be a positive number of days, got {}",
                            key, value
                        ))
                    })?;
                self.trash_retention_days = days;
            }
            "storage-quota-bytes" => {
                self.storage_quota_bytes = if value == "unlimited" {
                    None
                } else {
                    Some(parse_positive(key, value)?)
                };
            }
            _ => {
                return Err(TodoKeepError::Config(format!(
                    "Unknown config key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

/// Retention for a day count, or None when it is not positive or does not
/// fit a `Duration`.
fn retention_from_days(days: i64) -> Option<Duration> {
    if days <= 0 {
        return None;
    }
    Duration::try_days(days)
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(TodoKeepError::Config(format!(
            "{} must be a positive integer, got {}",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TodoKeepConfig::default();
        assert_eq!(config.trash_capacity, 50);
        assert_eq!(config.trash_retention_days, 7);
        assert_eq!(config.storage_quota_bytes, None);
    }

    #[test]
    fn test_default_policy_is_fifty_entries_for_seven_days() {
        let policy = TodoKeepConfig::default().trash_policy();
        assert_eq!(policy.capacity, 50);
        assert_eq!(policy.retention.num_milliseconds(), 604_800_000);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = TodoKeepConfig::default();
        config.set("trash-capacity", "10").unwrap();
        config.set("storage-quota-bytes", "5000").unwrap();
        assert_eq!(config.get("trash-capacity"), Some("10".to_string()));
        assert_eq!(config.get("storage-quota-bytes"), Some("5000".to_string()));

        config.set("storage-quota-bytes", "unlimited").unwrap();
        assert_eq!(config.storage_quota_bytes, None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = TodoKeepConfig::default();
        assert!(config.set("trash-capacity", "0").is_err());
        assert!(config.set("trash-retention-days", "soon").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, TodoKeepConfig::default());
    }

    #[test]
    fn test_set_rejects_retention_that_would_wrap_or_overflow() {
        let mut config = TodoKeepConfig::default();
        assert!(config.set("trash-retention-days", "18446744073709551615").is_err());
        assert!(config.set("trash-retention-days", "200000000000000").is_err());
        assert!(config.set("trash-retention-days", "-3").is_err());
        assert_eq!(config.trash_retention_days, 7);

        config.set("trash-retention-days", "30").unwrap();
        assert_eq!(config.trash_policy().retention, Duration::days(30));
    }

    #[test]
    fn test_policy_falls_back_for_out_of_range_fields() {
        let config = TodoKeepConfig {
            trash_capacity: 0,
            trash_retention_days: 200_000_000_000_000,
            storage_quota_bytes: None,
        };
        assert_eq!(config.trash_policy(), TrashPolicy::default());

        let negative = TodoKeepConfig {
            trash_retention_days: -1,
            ..TodoKeepConfig::default()
        };
        assert_eq!(negative.trash_policy().retention, Duration::days(7));
    }

    #[test]
    fn test_load_replaces_invalid_values_with_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"trash_capacity": 0, "trash_retention_days": 0, "storage_quota_bytes": 0}"#,
        )
        .unwrap();

        let loaded = TodoKeepConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, TodoKeepConfig::default());
    }

    #[test]
    fn test_load_replaces_huge_retention() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"trash_retention_days": 9223372036854775807}"#,
        )
        .unwrap();

        let loaded = TodoKeepConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.trash_retention_days, 7);
        assert_eq!(loaded.trash_policy().retention, Duration::days(7));
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = TodoKeepConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, TodoKeepConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = TodoKeepConfig::default();
        config.set("trash-retention-days", "3").unwrap();
        config.save(temp_dir.path()).unwrap();

        let loaded = TodoKeepConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.trash_retention_days, 3);
        assert_eq!(loaded.trash_capacity, 50);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"trash_capacity": 5}"#,
        )
        .unwrap();

        let loaded = TodoKeepConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.trash_capacity, 5);
        assert_eq!(loaded.trash_retention_days, 7);
    }
}
