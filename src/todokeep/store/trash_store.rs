//! The recently-deleted log.
//!
//! Expiry is lazy: nothing sweeps the log on a timer. Every read drops
//! entries older than the retention window (and entries that no longer
//! decode), and when that removed anything the survivors are written back
//! through [`TrashStore::compact`]. Whoever reads first after an entry
//! expires pays for the write.

use super::backend::StorageBackend;
use super::codec::decode_records;
use super::keys;
use crate::clock::Clock;
use crate::error::Result;
use crate::model::{DeletedTodo, Todo};
use chrono::{DateTime, Duration, Utc};
use log::{debug, error, info, warn};
use serde_json::Value;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrashPolicy {
    pub capacity: usize,
    pub retention: Duration,
}

impl TrashPolicy {
    /// Whole days left before an entry deleted at `deleted_at` expires,
    /// never below zero.
    pub fn days_left(&self, deleted_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        let elapsed_days = now.signed_duration_since(deleted_at).num_days();
        (self.retention.num_days() - elapsed_days).max(0)
    }
}

impl Default for TrashPolicy {
    fn default() -> Self {
        Self {
            capacity: 50,
            retention: Duration::days(7),
        }
    }
}

/// Result of handing a trash entry back to the live list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub success: bool,
    pub todo: Option<Todo>,
}

impl RestoreOutcome {
    fn restored(todo: Todo) -> Self {
        Self {
            success: true,
            todo: Some(todo),
        }
    }

    fn failed() -> Self {
        Self {
            success: false,
            todo: None,
        }
    }
}

/// Raw contents of the log slot before expiry is applied.
#[derive(Debug, Default)]
struct LogRead {
    entries: Vec<DeletedTodo>,
    /// Stored entries that did not decode.
    dropped: usize,
}

pub struct TrashStore<B: StorageBackend> {
    backend: B,
    clock: Rc<dyn Clock>,
    policy: TrashPolicy,
}

/// Split entries into (kept, expired). An entry expires once its age reaches
/// `retention`; entries stamped in the future are kept.
pub fn partition_expired(
    entries: Vec<DeletedTodo>,
    now: DateTime<Utc>,
    retention: Duration,
) -> (Vec<DeletedTodo>, Vec<DeletedTodo>) {
    entries
        .into_iter()
        .partition(|entry| now.signed_duration_since(entry.deleted_at) < retention)
}

impl<B: StorageBackend> TrashStore<B> {
    pub fn with_backend(backend: B, clock: Rc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            policy: TrashPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TrashPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> TrashPolicy {
        self.policy
    }

    /// Every live entry, most recently deleted first. Expired and malformed
    /// entries are removed from storage as a side effect.
    pub fn get_all(&self) -> Vec<DeletedTodo> {
        self.load_compacted().0
    }

    /// Run the read path and report how many stored entries it removed.
    pub fn cleanup_expired(&self) -> usize {
        let (_, removed) = self.load_compacted();
        removed
    }

    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    fn load_compacted(&self) -> (Vec<DeletedTodo>, usize) {
        let read = self.read_log();
        let (mut kept, expired) =
            partition_expired(read.entries, self.clock.now(), self.policy.retention);

        let removed = read.dropped + expired.len();
        if removed > 0 {
            info!(
                "Removing {} expired and {} malformed recently-deleted entries",
                expired.len(),
                read.dropped
            );
            self.compact(&kept);
        }

        kept.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        (kept, removed)
    }

    /// Write `kept` back as the whole log. This is the write half of lazy
    /// expiry; a failure is logged and the next read simply retries.
    pub fn compact(&self, kept: &[DeletedTodo]) -> bool {
        match self.write_log(kept) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to compact recently-deleted log: {}", e);
                false
            }
        }
    }

    fn read_log(&self) -> LogRead {
        let raw = match self.backend.get_item(keys::RECENTLY_DELETED) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LogRead::default(),
            Err(e) => {
                warn!("Could not read recently-deleted log: {}", e);
                return LogRead::default();
            }
        };

        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                warn!("Recently-deleted log is not a list, discarding it");
                self.discard_corrupt_log();
                return LogRead::default();
            }
            Err(e) => {
                warn!("Recently-deleted log is not valid JSON ({}), discarding it", e);
                self.discard_corrupt_log();
                return LogRead::default();
            }
        };

        let (entries, dropped) = decode_records(&items);
        LogRead { entries, dropped }
    }

    fn discard_corrupt_log(&self) {
        if let Err(e) = self.backend.remove_item(keys::RECENTLY_DELETED) {
            error!("Failed to remove corrupt recently-deleted log: {}", e);
        }
    }

    fn write_log(&self, entries: &[DeletedTodo]) -> Result<()> {
        let encoded = serde_json::to_string(entries)?;
        self.backend.set_item(keys::RECENTLY_DELETED, &encoded)
    }

    /// Move a copy of `todo` into the log, stamped with the current time.
    ///
    /// Adding an id that is already in the log is a successful no-op. The
    /// log is cut to capacity, oldest deletions first.
    pub fn add(&self, todo: &Todo) -> bool {
        let mut entries = self.get_all();
        if entries.iter().any(|entry| entry.id() == todo.id) {
            debug!("Todo {} already in recently deleted", todo.id);
            return true;
        }

        entries.insert(0, DeletedTodo::new(todo.clone(), self.clock.now()));
        entries.truncate(self.policy.capacity);

        match self.write_log(&entries) {
            Ok(()) => {
                debug!("Todo {} moved to recently deleted", todo.id);
                true
            }
            Err(e) => {
                error!("Failed to add todo {} to recently deleted: {}", todo.id, e);
                false
            }
        }
    }

    /// Take `entry` out of the log and return its original todo for the
    /// caller to re-insert. The primary store is not touched here.
    pub fn restore(&self, entry: &DeletedTodo) -> RestoreOutcome {
        match self.remove_entry(entry.id()) {
            Ok(()) => {
                debug!("Todo {} restored from recently deleted", entry.id());
                RestoreOutcome::restored(entry.todo.clone())
            }
            Err(e) => {
                error!("Failed to restore todo {}: {}", entry.id(), e);
                RestoreOutcome::failed()
            }
        }
    }

    /// Drop the entry for `id` for good.
    pub fn purge(&self, id: i64) -> bool {
        match self.remove_entry(id) {
            Ok(()) => {
                debug!("Todo {} permanently deleted", id);
                true
            }
            Err(e) => {
                error!("Failed to permanently delete todo {}: {}", id, e);
                false
            }
        }
    }

    // Unknown ids leave the log as it was; that is still a success.
    fn remove_entry(&self, id: i64) -> Result<()> {
        let remaining: Vec<DeletedTodo> = self
            .get_all()
            .into_iter()
            .filter(|entry| entry.id() != id)
            .collect();
        self.write_log(&remaining)
    }

    pub fn clear(&self) -> bool {
        match self.backend.remove_item(keys::RECENTLY_DELETED) {
            Ok(()) => {
                info!("Recently deleted log cleared");
                true
            }
            Err(e) => {
                error!("Failed to clear recently deleted log: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::mem_backend::MemBackend;
    use chrono::TimeZone;
    use serde_json::json;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    struct Fixture {
        store: TrashStore<Rc<MemBackend>>,
        backend: Rc<MemBackend>,
        clock: ManualClock,
    }

    fn fixture() -> Fixture {
        let backend = Rc::new(MemBackend::new());
        let clock = ManualClock::new(start());
        let store = TrashStore::with_backend(Rc::clone(&backend), Rc::new(clock.clone()));
        Fixture {
            store,
            backend,
            clock,
        }
    }

    fn todo(id: i64) -> Todo {
        Todo::new(id, format!("Task {}", id), start() - Duration::days(30))
    }

    fn stored_len(backend: &MemBackend) -> usize {
        let raw = backend.get_item(keys::RECENTLY_DELETED).unwrap().unwrap();
        serde_json::from_str::<Vec<Value>>(&raw).unwrap().len()
    }

    fn ids(entries: &[DeletedTodo]) -> Vec<i64> {
        entries.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn test_empty_log() {
        let f = fixture();
        assert!(f.store.get_all().is_empty());
        assert_eq!(f.store.count(), 0);
    }

    #[test]
    fn test_add_stamps_deleted_at() {
        let f = fixture();
        assert!(f.store.add(&todo(1)));

        let all = f.store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].deleted_at, start());
        assert_eq!(all[0].todo, todo(1));
    }

    #[test]
    fn test_add_same_id_twice_keeps_one_entry() {
        let f = fixture();
        assert!(f.store.add(&todo(1)));
        f.clock.advance(Duration::seconds(1));
        assert!(f.store.add(&todo(1)));

        let all = f.store.get_all();
        assert_eq!(ids(&all), vec![1]);
        assert_eq!(all[0].deleted_at, start());
    }

    #[test]
    fn test_expiry_drops_entries_older_than_retention() {
        let f = fixture();
        f.store.add(&todo(1));
        f.clock.advance(Duration::days(2));
        f.store.add(&todo(2));

        // todo 1 is now 8 days old, todo 2 is 6 days old
        f.clock.advance(Duration::days(6));
        assert_eq!(ids(&f.store.get_all()), vec![2]);
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let f = fixture();
        f.store.add(&todo(1));

        f.clock.advance(Duration::days(7) - Duration::milliseconds(1));
        assert_eq!(f.store.count(), 1);

        f.clock.advance(Duration::milliseconds(1));
        assert_eq!(f.store.count(), 0);
    }

    #[test]
    fn test_expiry_is_written_back() {
        let f = fixture();
        f.store.add(&todo(1));
        f.clock.advance(Duration::days(3));
        f.store.add(&todo(2));
        assert_eq!(stored_len(&f.backend), 2);

        f.clock.advance(Duration::days(5));
        f.store.get_all();
        assert_eq!(stored_len(&f.backend), 1);
    }

    #[test]
    fn test_read_without_expiry_does_not_write() {
        let f = fixture();
        f.store.add(&todo(1));
        f.backend.set_simulate_write_error(true);
        assert_eq!(f.store.count(), 1);
    }

    #[test]
    fn test_capacity_keeps_most_recent() {
        let f = fixture();
        for id in 1..=55 {
            assert!(f.store.add(&todo(id)));
            f.clock.advance(Duration::seconds(1));
        }

        let all = f.store.get_all();
        assert_eq!(all.len(), 50);
        assert_eq!(all.first().map(|e| e.id()), Some(55));
        assert_eq!(all.last().map(|e| e.id()), Some(6));
        assert_eq!(stored_len(&f.backend), 50);
    }

    #[test]
    fn test_custom_policy() {
        let f = fixture();
        let store = TrashStore::with_backend(Rc::clone(&f.backend), Rc::new(f.clock.clone()))
            .with_policy(TrashPolicy {
                capacity: 2,
                retention: Duration::hours(1),
            });
        store.add(&todo(1));
        f.clock.advance(Duration::minutes(1));
        store.add(&todo(2));
        f.clock.advance(Duration::minutes(1));
        store.add(&todo(3));
        assert_eq!(ids(&store.get_all()), vec![3, 2]);

        f.clock.advance(Duration::hours(1));
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_ordering_most_recent_first() {
        let f = fixture();
        let raw = json!([
            DeletedTodo::new(todo(1), start() - Duration::hours(3)),
            DeletedTodo::new(todo(2), start() - Duration::hours(1)),
            DeletedTodo::new(todo(3), start() - Duration::hours(2)),
        ])
        .to_string();
        f.backend.set_item(keys::RECENTLY_DELETED, &raw).unwrap();

        assert_eq!(ids(&f.store.get_all()), vec![2, 3, 1]);
    }

    #[test]
    fn test_restore_removes_entry_and_strips_metadata() {
        let f = fixture();
        f.store.add(&todo(1));
        f.store.add(&todo(2));
        let entry = f
            .store
            .get_all()
            .into_iter()
            .find(|e| e.id() == 1)
            .unwrap();

        let outcome = f.store.restore(&entry);
        assert!(outcome.success);
        let restored = outcome.todo.unwrap();
        assert_eq!(restored, todo(1));
        let value = serde_json::to_value(&restored).unwrap();
        assert!(value.get("deletedAt").is_none());

        assert_eq!(ids(&f.store.get_all()), vec![2]);
    }

    #[test]
    fn test_restore_then_delete_gets_fresh_deleted_at() {
        let f = fixture();
        f.store.add(&todo(1));
        let entry = f.store.get_all().remove(0);
        let restored = f.store.restore(&entry).todo.unwrap();

        f.clock.advance(Duration::hours(5));
        assert!(f.store.add(&restored));

        let again = f.store.get_all();
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].deleted_at, start() + Duration::hours(5));
        assert_ne!(again[0].deleted_at, entry.deleted_at);
    }

    #[test]
    fn test_restore_failure_returns_no_todo() {
        let f = fixture();
        f.store.add(&todo(1));
        let entry = f.store.get_all().remove(0);

        f.backend.set_simulate_write_error(true);
        let outcome = f.store.restore(&entry);
        assert_eq!(outcome, RestoreOutcome::failed());

        f.backend.set_simulate_write_error(false);
        assert_eq!(f.store.count(), 1);
    }

    #[test]
    fn test_restore_unknown_id_is_silent_success() {
        let f = fixture();
        f.store.add(&todo(1));
        let stranger = DeletedTodo::new(todo(99), start());

        let outcome = f.store.restore(&stranger);
        assert!(outcome.success);
        assert_eq!(f.store.count(), 1);
    }

    #[test]
    fn test_purge() {
        let f = fixture();
        f.store.add(&todo(1));
        f.store.add(&todo(2));

        assert!(f.store.purge(1));
        assert_eq!(ids(&f.store.get_all()), vec![2]);
        assert!(f.store.purge(42));
        assert_eq!(f.store.count(), 1);
    }

    #[test]
    fn test_purge_write_failure() {
        let f = fixture();
        f.store.add(&todo(1));
        f.backend.set_simulate_write_error(true);
        assert!(!f.store.purge(1));
    }

    #[test]
    fn test_clear() {
        let f = fixture();
        f.store.add(&todo(1));
        f.store.add(&todo(2));
        assert!(f.store.clear());
        assert_eq!(f.store.count(), 0);
        assert_eq!(f.backend.get_item(keys::RECENTLY_DELETED).unwrap(), None);
    }

    #[test]
    fn test_add_write_failure_returns_false() {
        let f = fixture();
        f.backend.set_simulate_write_error(true);
        assert!(!f.store.add(&todo(1)));
    }

    #[test]
    fn test_add_over_quota_returns_false() {
        let backend = Rc::new(MemBackend::new().with_quota(40));
        let store = TrashStore::with_backend(Rc::clone(&backend), Rc::new(ManualClock::new(start())));
        assert!(!store.add(&todo(1)));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_invalid_json_is_treated_as_empty_and_discarded() {
        let f = fixture();
        f.backend
            .set_item(keys::RECENTLY_DELETED, "[{\"id\": 1,")
            .unwrap();

        assert!(f.store.get_all().is_empty());
        assert_eq!(f.backend.get_item(keys::RECENTLY_DELETED).unwrap(), None);

        assert!(f.store.add(&todo(1)));
        assert_eq!(f.store.count(), 1);
    }

    #[test]
    fn test_non_list_log_is_treated_as_empty() {
        let f = fixture();
        f.backend
            .set_item(keys::RECENTLY_DELETED, r#"{"id": 1}"#)
            .unwrap();
        assert!(f.store.get_all().is_empty());
    }

    #[test]
    fn test_unparseable_deleted_at_is_dropped_and_compacted() {
        let f = fixture();
        let raw = json!([
            { "id": 1, "text": "no stamp", "completed": false, "createdAt": "2024-04-01T00:00:00Z" },
            { "id": 2, "text": "bad stamp", "completed": false, "createdAt": "2024-04-01T00:00:00Z",
              "deletedAt": "not a date" },
            DeletedTodo::new(todo(3), start() - Duration::hours(1)),
        ])
        .to_string();
        f.backend.set_item(keys::RECENTLY_DELETED, &raw).unwrap();

        assert_eq!(ids(&f.store.get_all()), vec![3]);
        assert_eq!(stored_len(&f.backend), 1);
    }

    #[test]
    fn test_reads_browser_written_entries() {
        let f = fixture();
        let raw = r#"[{"id":1714560000000,"text":"Water plants","completed":true,
            "createdAt":"2024-04-30T08:00:00.000Z","completedAt":"2024-04-30T09:00:00.000Z",
            "deletedAt":"2024-05-01T10:00:00.000Z"}]"#;
        f.backend.set_item(keys::RECENTLY_DELETED, raw).unwrap();

        let all = f.store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].todo.text, "Water plants");
        assert!(all[0].todo.completed_at.is_some());
    }

    #[test]
    fn test_cleanup_expired_reports_removed() {
        let f = fixture();
        f.store.add(&todo(1));
        f.store.add(&todo(2));
        f.clock.advance(Duration::days(1));
        f.store.add(&todo(3));

        f.clock.advance(Duration::days(6) + Duration::hours(1));
        assert_eq!(f.store.cleanup_expired(), 2);
        assert_eq!(f.store.cleanup_expired(), 0);
        assert_eq!(f.store.count(), 1);
    }

    #[test]
    fn test_compact_is_callable_directly() {
        let f = fixture();
        f.store.add(&todo(1));
        f.store.add(&todo(2));

        let (kept, expired) =
            partition_expired(f.store.get_all(), start() + Duration::days(8), Duration::days(7));
        assert!(kept.is_empty());
        assert_eq!(expired.len(), 2);

        assert!(f.store.compact(&kept));
        assert_eq!(stored_len(&f.backend), 0);
    }

    #[test]
    fn test_days_left() {
        let policy = TrashPolicy::default();
        assert_eq!(policy.days_left(start(), start()), 7);
        assert_eq!(policy.days_left(start(), start() + Duration::hours(30)), 6);
        assert_eq!(policy.days_left(start(), start() + Duration::days(9)), 0);
    }

    #[test]
    fn test_partition_keeps_future_entries() {
        let entries = vec![DeletedTodo::new(todo(1), start() + Duration::days(1))];
        let (kept, expired) = partition_expired(entries, start(), Duration::days(7));
        assert_eq!(kept.len(), 1);
        assert!(expired.is_empty());
    }
}
