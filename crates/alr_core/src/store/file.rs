//! Single-file store adapter
//!
//! The whole configuration document lives in memory behind a mutex. Every
//! mutation clones the document, applies the change to the clone, persists
//! it atomically (temp file + sync + rename), and only then commits the
//! clone back. A failed write leaves both the file and the in-memory state
//! on the previous version.

use std::fs::{rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::balance::config::GameBalanceConfig;

use super::error::StoreError;
use super::format::{decompress_and_deserialize, serialize_and_compress, ConfigDocument};
use super::migration::migrate_document;
use super::{ConfigHistoryEntry, ConfigStore, StoredConfigRecord};

pub struct FileConfigStore {
    path: PathBuf,
    document: Mutex<ConfigDocument>,
}

impl FileConfigStore {
    /// Open a store file, starting from an empty document when the file
    /// does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let document = if path.exists() {
            let mut file = File::open(&path)?;
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;

            let document = decompress_and_deserialize(&data)?;
            let document = migrate_document(document)?;
            document.validate()?;

            log::debug!("Loaded {} bytes from {:?}", data.len(), path);
            document
        } else {
            ConfigDocument::new()
        };

        Ok(Self { path, document: Mutex::new(document) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, document: &ConfigDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            // A bare filename has an empty parent component
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = serialize_and_compress(document)?;

        // Atomic save: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;

            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }

        rename(&temp_path, &self.path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }

    /// Run a mutation against a draft of the document and commit it only
    /// after a successful persist
    fn with_document<T>(
        &self,
        apply: impl FnOnce(&mut ConfigDocument) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.document.lock().map_err(|_| StoreError::LockPoisoned)?;

        let mut draft = guard.clone();
        let result = apply(&mut draft)?;
        draft.touch();
        self.persist(&draft)?;
        *guard = draft;

        Ok(result)
    }
}

impl ConfigStore for FileConfigStore {
    fn active_record(&self) -> Result<Option<StoredConfigRecord>, StoreError> {
        let guard = self.document.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.records.iter().find(|record| record.is_active).cloned())
    }

    fn record_by_id(&self, id: Uuid) -> Result<Option<StoredConfigRecord>, StoreError> {
        let guard = self.document.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.records.iter().find(|record| record.id == id).cloned())
    }

    fn create_active(
        &self,
        config: &GameBalanceConfig,
        created_by: &str,
    ) -> Result<StoredConfigRecord, StoreError> {
        self.with_document(|document| {
            for record in document.records.iter_mut() {
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
            document.records.push(record.clone());

            Ok(record)
        })
    }

    fn update_active(
        &self,
        record_id: Uuid,
        expected_version: u32,
        config: &GameBalanceConfig,
        changed_by: &str,
        reason: Option<&str>,
    ) -> Result<StoredConfigRecord, StoreError> {
        self.with_document(|document| {
            let position = document
                .records
                .iter()
                .position(|record| record.id == record_id)
                .ok_or(StoreError::RecordNotFound { id: record_id })?;

            {
                let record = &document.records[position];
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
            }

            let old_config = document.records[position].config.clone();
            document.history.push(ConfigHistoryEntry {
                id: Uuid::new_v4(),
                config_id: record_id,
                old_config,
                new_config: config.clone(),
                changed_by: changed_by.to_string(),
                change_reason: reason.map(str::to_string),
                created_at: Utc::now(),
            });

            let record = &mut document.records[position];
            record.config = config.clone();
            record.version += 1;
            record.updated_at = Utc::now();

            Ok(record.clone())
        })
    }

    fn history_for(&self, config_id: Uuid) -> Result<Vec<ConfigHistoryEntry>, StoreError> {
        let guard = self.document.lock().map_err(|_| StoreError::LockPoisoned)?;

        Ok(guard
            .history
            .iter()
            .rev()
            .filter(|entry| entry.config_id == config_id)
            .cloned()
            .collect())
    }

    fn history_entry(&self, entry_id: Uuid) -> Result<Option<ConfigHistoryEntry>, StoreError> {
        let guard = self.document.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.history.iter().find(|entry| entry.id == entry_id).cloned())
    }
}
