//! In-memory store adapter
//!
//! Backs tests and embedding hosts that manage persistence themselves.
//! A single `RwLock` guards records and history together, so every trait
//! call (including the compound mutations) is one critical section.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::balance::config::GameBalanceConfig;

use super::error::StoreError;
use super::{ConfigHistoryEntry, ConfigStore, StoredConfigRecord};

#[derive(Default)]
struct MemoryInner {
    records: HashMap<Uuid, StoredConfigRecord>,
    history: Vec<ConfigHistoryEntry>,
}

#[derive(Default)]
pub struct MemoryConfigStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn active_record(&self) -> Result<Option<StoredConfigRecord>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.records.values().find(|record| record.is_active).cloned())
    }

    fn record_by_id(&self, id: Uuid) -> Result<Option<StoredConfigRecord>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.records.get(&id).cloned())
    }

    fn create_active(
        &self,
        config: &GameBalanceConfig,
        created_by: &str,
    ) -> Result<StoredConfigRecord, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;

        for record in inner.records.values_mut() {
            record.is_active = false;
        }

        let now = Utc::now();
        let record = StoredConfigRecord {
            id: Uuid::new_v4(),
            config: config.clone(),
            is_active: true,
            version: 1,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.records.insert(record.id, record.clone());

        Ok(record)
    }

    fn update_active(
        &self,
        record_id: Uuid,
        expected_version: u32,
        config: &GameBalanceConfig,
        changed_by: &str,
        reason: Option<&str>,
    ) -> Result<StoredConfigRecord, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;

        let old_config = {
            let record = inner
                .records
                .get(&record_id)
                .ok_or(StoreError::RecordNotFound { id: record_id })?;

            if !record.is_active {
                return Err(StoreError::NotActive { id: record_id });
            }
            if record.version != expected_version {
                return Err(StoreError::Conflict {
                    id: record_id,
                    expected: expected_version,
                    found: record.version,
                });
            }

            record.config.clone()
        };

        inner.history.push(ConfigHistoryEntry {
            id: Uuid::new_v4(),
            config_id: record_id,
            old_config,
            new_config: config.clone(),
            changed_by: changed_by.to_string(),
            change_reason: reason.map(str::to_string),
            created_at: Utc::now(),
        });

        let record = inner
            .records
            .get_mut(&record_id)
            .ok_or(StoreError::RecordNotFound { id: record_id })?;
        record.config = config.clone();
        record.version += 1;
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    fn history_for(&self, config_id: Uuid) -> Result<Vec<ConfigHistoryEntry>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;

        // History is append-only; reverse iteration yields newest first
        Ok(inner
            .history
            .iter()
            .rev()
            .filter(|entry| entry.config_id == config_id)
            .cloned()
            .collect())
    }

    fn history_entry(&self, entry_id: Uuid) -> Result<Option<ConfigHistoryEntry>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.history.iter().find(|entry| entry.id == entry_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn altered_config() -> GameBalanceConfig {
        let mut config = GameBalanceConfig::default();
        config.path_level_config.xp_per_level = 500;
        config
    }

    #[test]
    fn test_create_activates_record() {
        let store = MemoryConfigStore::new();

        let record = store.create_active(&GameBalanceConfig::default(), "admin").unwrap();

        assert!(record.is_active);
        assert_eq!(record.version, 1);
        assert_eq!(record.created_by, "admin");

        let active = store.active_record().unwrap().unwrap();
        assert_eq!(active.id, record.id);
    }

    #[test]
    fn test_create_deactivates_previous() {
        let store = MemoryConfigStore::new();

        let first = store.create_active(&GameBalanceConfig::default(), "admin").unwrap();
        let second = store.create_active(&altered_config(), "admin").unwrap();

        let active = store.active_record().unwrap().unwrap();
        assert_eq!(active.id, second.id);

        let old = store.record_by_id(first.id).unwrap().unwrap();
        assert!(!old.is_active);
    }

    #[test]
    fn test_update_bumps_version_and_appends_history() {
        let store = MemoryConfigStore::new();
        let created = store.create_active(&GameBalanceConfig::default(), "admin").unwrap();

        let updated = store
            .update_active(created.id, 1, &altered_config(), "admin", Some("tuning pass"))
            .unwrap();

        assert_eq!(updated.version, 2);
        assert_eq!(updated.config, altered_config());

        let history = store.history_for(created.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].config_id, created.id);
        assert_eq!(history[0].old_config, GameBalanceConfig::default());
        assert_eq!(history[0].new_config, altered_config());
        assert_eq!(history[0].changed_by, "admin");
        assert_eq!(history[0].change_reason.as_deref(), Some("tuning pass"));
    }

    #[test]
    fn test_update_with_stale_version_conflicts() {
        let store = MemoryConfigStore::new();
        let created = store.create_active(&GameBalanceConfig::default(), "admin").unwrap();

        store.update_active(created.id, 1, &altered_config(), "a", None).unwrap();

        // A second writer that read version 1 loses
        let result = store.update_active(created.id, 1, &GameBalanceConfig::default(), "b", None);
        assert!(matches!(
            result,
            Err(StoreError::Conflict { expected: 1, found: 2, .. })
        ));

        // The losing write left no history entry
        assert_eq!(store.history_for(created.id).unwrap().len(), 1);
    }

    #[test]
    fn test_update_inactive_record_rejected() {
        let store = MemoryConfigStore::new();
        let first = store.create_active(&GameBalanceConfig::default(), "admin").unwrap();
        store.create_active(&altered_config(), "admin").unwrap();

        let result = store.update_active(first.id, 1, &altered_config(), "admin", None);
        assert!(matches!(result, Err(StoreError::NotActive { .. })));
    }

    #[test]
    fn test_update_unknown_record_rejected() {
        let store = MemoryConfigStore::new();

        let result =
            store.update_active(Uuid::new_v4(), 1, &GameBalanceConfig::default(), "admin", None);
        assert!(matches!(result, Err(StoreError::RecordNotFound { .. })));
    }

    #[test]
    fn test_history_newest_first() {
        let store = MemoryConfigStore::new();
        let created = store.create_active(&GameBalanceConfig::default(), "admin").unwrap();

        store.update_active(created.id, 1, &altered_config(), "admin", Some("first")).unwrap();
        store
            .update_active(created.id, 2, &GameBalanceConfig::default(), "admin", Some("second"))
            .unwrap();

        let history = store.history_for(created.id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].change_reason.as_deref(), Some("second"));
        assert_eq!(history[1].change_reason.as_deref(), Some("first"));
    }

    #[test]
    fn test_history_for_unknown_id_is_empty() {
        let store = MemoryConfigStore::new();
        assert!(store.history_for(Uuid::new_v4()).unwrap().is_empty());
    }

    #[test]
    fn test_history_entry_lookup() {
        let store = MemoryConfigStore::new();
        let created = store.create_active(&GameBalanceConfig::default(), "admin").unwrap();
        store.update_active(created.id, 1, &altered_config(), "admin", None).unwrap();

        let entry = &store.history_for(created.id).unwrap()[0];
        let found = store.history_entry(entry.id).unwrap().unwrap();
        assert_eq!(found.id, entry.id);

        assert!(store.history_entry(Uuid::new_v4()).unwrap().is_none());
    }
}
