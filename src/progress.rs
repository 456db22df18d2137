//! Stage-clear persistence
//!
//! Progress is a JSON record under a fixed key in whatever key-value store
//! the host provides (LocalStorage in the browser, in-memory elsewhere).
//! Storage failures are logged and degrade to empty progress; they never
//! reach the player.

use serde::{Deserialize, Serialize};

use crate::stages::MAX_STAGE;

/// Storage key for the progress record
pub const STORAGE_KEY: &str = "blockbreaker_progress";

/// Key-value persistence contract implemented by the host platform
pub trait KeyValueStore {
    /// Fetch the raw value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`; returns false when the write was rejected
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok()).flatten()?;
        storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
        else {
            return false;
        };
        storage.set_item(key, value).is_ok()
    }
}

/// The persisted record: one cleared flag per stage plus a save timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(rename = "clearedStages")]
    pub cleared_stages: Vec<bool>,
    /// RFC 3339 timestamp of the last save
    #[serde(rename = "lastSaved")]
    pub last_saved: String,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            cleared_stages: vec![false; MAX_STAGE as usize],
            last_saved: String::new(),
        }
    }
}

impl ProgressRecord {
    /// Force the cleared flags back to exactly one per stage. Records saved
    /// by other versions may carry a different length; pad or truncate so
    /// the invariant holds for the life of the store.
    fn normalize(mut self) -> Self {
        if self.cleared_stages.len() != MAX_STAGE as usize {
            log::warn!(
                "progress record has {} stages, expected {MAX_STAGE}; adjusting",
                self.cleared_stages.len()
            );
            self.cleared_stages.resize(MAX_STAGE as usize, false);
        }
        self
    }
}

/// Loads, mutates and saves the progress record over a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct ProgressStore<S: KeyValueStore> {
    store: S,
    record: ProgressRecord,
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Read the saved record, falling back to all-unclear when the store is
    /// empty or the data does not parse.
    pub fn load(store: S) -> Self {
        let record = match store.get(STORAGE_KEY) {
            Some(json) => match serde_json::from_str::<ProgressRecord>(&json) {
                Ok(record) => {
                    log::info!("loaded stage progress (saved {})", record.last_saved);
                    record.normalize()
                }
                Err(err) => {
                    log::warn!("corrupt progress record, starting fresh: {err}");
                    ProgressRecord::default()
                }
            },
            None => {
                log::info!("no saved progress found");
                ProgressRecord::default()
            }
        };
        Self { store, record }
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    /// The backing store, for hosts that share it with other records
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cleared_stages(&self) -> &[bool] {
        &self.record.cleared_stages
    }

    /// Whether a stage (1-based) has been cleared at least once
    pub fn is_cleared(&self, stage: u32) -> bool {
        self.record
            .cleared_stages
            .get((stage.saturating_sub(1)) as usize)
            .copied()
            .unwrap_or(false)
    }

    pub fn cleared_count(&self) -> usize {
        self.record.cleared_stages.iter().filter(|c| **c).count()
    }

    /// Mark a stage (1-based) cleared. Out-of-range numbers are ignored.
    pub fn mark_cleared(&mut self, stage: u32) {
        if (1..=MAX_STAGE).contains(&stage) {
            self.record.cleared_stages[(stage - 1) as usize] = true;
        }
    }

    pub fn mark_all_cleared(&mut self) {
        self.record.cleared_stages.fill(true);
    }

    /// Wipe all cleared flags (the record still needs a save to persist)
    pub fn reset(&mut self) {
        self.record.cleared_stages.fill(false);
    }

    /// Stamp and write the record. Failures are logged and swallowed; the
    /// in-memory record stays authoritative for the session either way.
    pub fn save(&mut self) {
        self.record.last_saved = chrono::Utc::now().to_rfc3339();
        match serde_json::to_string(&self.record) {
            Ok(json) => {
                if self.store.set(STORAGE_KEY, &json) {
                    log::info!("stage progress saved ({} cleared)", self.cleared_count());
                } else {
                    log::warn!("progress store rejected the write, continuing without save");
                }
            }
            Err(err) => log::warn!("failed to encode progress record: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_load_empty_store_defaults() {
        let progress = ProgressStore::load(MemoryStore::new());
        assert_eq!(progress.cleared_count(), 0);
        assert_eq!(progress.cleared_stages().len(), MAX_STAGE as usize);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut progress = ProgressStore::load(MemoryStore::new());
        progress.mark_cleared(1);
        progress.mark_cleared(7);
        progress.save();

        let reloaded = ProgressStore::load(progress.store.clone());
        assert_eq!(reloaded.record(), progress.record());
        assert!(reloaded.is_cleared(1));
        assert!(reloaded.is_cleared(7));
        assert!(!reloaded.is_cleared(2));
    }

    #[test]
    fn test_corrupt_record_recovers_to_default() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json");
        let progress = ProgressStore::load(store);
        assert_eq!(progress.cleared_count(), 0);
    }

    #[test]
    fn test_foreign_length_record_is_normalized() {
        let mut store = MemoryStore::new();
        store.set(
            STORAGE_KEY,
            r#"{"clearedStages":[true,true],"lastSaved":"2024-01-01T00:00:00Z"}"#,
        );
        let progress = ProgressStore::load(store);
        assert_eq!(progress.cleared_stages().len(), MAX_STAGE as usize);
        assert!(progress.is_cleared(1));
        assert!(progress.is_cleared(2));
        assert!(!progress.is_cleared(3));
    }

    #[test]
    fn test_json_field_names() {
        let mut progress = ProgressStore::load(MemoryStore::new());
        progress.mark_cleared(3);
        progress.save();
        let json = progress.store.get(STORAGE_KEY).unwrap();
        assert!(json.contains("\"clearedStages\""));
        assert!(json.contains("\"lastSaved\""));
    }

    #[test]
    fn test_mark_all_and_reset() {
        let mut progress = ProgressStore::load(MemoryStore::new());
        progress.mark_all_cleared();
        assert_eq!(progress.cleared_count(), MAX_STAGE as usize);
        progress.reset();
        assert_eq!(progress.cleared_count(), 0);
    }

    #[test]
    fn test_out_of_range_mark_ignored() {
        let mut progress = ProgressStore::load(MemoryStore::new());
        progress.mark_cleared(0);
        progress.mark_cleared(MAX_STAGE + 1);
        assert_eq!(progress.cleared_count(), 0);
    }

    /// A store whose writes always fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&mut self, _key: &str, _value: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut progress = ProgressStore::load(BrokenStore);
        progress.mark_cleared(5);
        progress.save();
        // The session record is still authoritative
        assert!(progress.is_cleared(5));
    }

    proptest! {
        #[test]
        fn prop_round_trip_preserves_cleared_flags(
            flags in proptest::collection::vec(any::<bool>(), MAX_STAGE as usize)
        ) {
            let mut progress = ProgressStore::load(MemoryStore::new());
            for (i, cleared) in flags.iter().enumerate() {
                if *cleared {
                    progress.mark_cleared(i as u32 + 1);
                }
            }
            progress.save();

            let reloaded = ProgressStore::load(progress.store.clone());
            prop_assert_eq!(reloaded.record(), progress.record());
            prop_assert_eq!(reloaded.cleared_stages(), flags.as_slice());
        }
    }
}
