//! Balance configuration service
//!
//! Wraps a `ConfigStore` with validation, a TTL cache for the active
//! configuration, and the create/update/history/rollback operations. The
//! service is an explicit value: construct it with the store it should use
//! and share it behind an `Arc` when multiple owners need it.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::balance::config::GameBalanceConfig;
use crate::balance::validation::{ConfigValidator, ValidationError};
use crate::error::{CoreError, Result};

use super::{ConfigHistoryEntry, ConfigStore, StoredConfigRecord};

/// How long a fetched active configuration is served from cache
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

struct CachedConfig {
    config: GameBalanceConfig,
    fetched_at: Instant,
}

pub struct BalanceConfigService {
    store: Arc<dyn ConfigStore>,
    cache: Mutex<Option<CachedConfig>>,
    cache_ttl: Duration,
}

impl BalanceConfigService {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self::with_cache_ttl(store, DEFAULT_CACHE_TTL)
    }

    /// Service with a custom cache TTL; tests inject tiny values
    pub fn with_cache_ttl(store: Arc<dyn ConfigStore>, cache_ttl: Duration) -> Self {
        Self { store, cache: Mutex::new(None), cache_ttl }
    }

    /// The active configuration, served from cache while fresh
    ///
    /// Never fails. With no active record, a store error, or a stored
    /// configuration that no longer validates, the built-in defaults are
    /// returned and nothing is cached.
    pub fn get_active_config(&self) -> GameBalanceConfig {
        if let Ok(guard) = self.cache.lock() {
            if let Some(cached) = guard.as_ref() {
                if cached.fetched_at.elapsed() < self.cache_ttl {
                    return cached.config.clone();
                }
            }
        }

        let record = match self.store.active_record() {
            Ok(Some(record)) => record,
            Ok(None) => return GameBalanceConfig::default(),
            Err(err) => {
                log::warn!("Failed to read active configuration, using defaults: {}", err);
                return GameBalanceConfig::default();
            }
        };

        if let Err(err) = ConfigValidator::validate(&record.config) {
            log::warn!(
                "Stored configuration {} failed validation, using defaults: {}",
                record.id,
                err
            );
            return GameBalanceConfig::default();
        }

        if let Ok(mut guard) = self.cache.lock() {
            *guard = Some(CachedConfig {
                config: record.config.clone(),
                fetched_at: Instant::now(),
            });
        }

        record.config
    }

    /// The configuration stored under `id`, re-validated before returning
    pub fn get_config_by_id(&self, id: Uuid) -> Result<Option<GameBalanceConfig>> {
        let record = match self.store.record_by_id(id)? {
            Some(record) => record,
            None => return Ok(None),
        };

        ConfigValidator::validate(&record.config)?;
        Ok(Some(record.config))
    }

    /// Create a new configuration and make it active
    ///
    /// Any previously active configuration is deactivated in the same store
    /// operation.
    pub fn create_config(
        &self,
        config: &GameBalanceConfig,
        user_id: &str,
    ) -> Result<StoredConfigRecord> {
        ConfigValidator::validate(config)?;

        let record = self.store.create_active(config, user_id)?;
        self.invalidate_cache();

        log::info!("Created balance configuration {} (created by {})", record.id, user_id);
        Ok(record)
    }

    /// Update the active configuration, recording a history entry
    ///
    /// Behaves as `create_config` when nothing is active yet. A concurrent
    /// writer that got there first surfaces as `StoreError::Conflict`; the
    /// caller decides whether to re-read and retry.
    pub fn update_active_config(
        &self,
        config: &GameBalanceConfig,
        user_id: &str,
        reason: Option<&str>,
    ) -> Result<StoredConfigRecord> {
        ConfigValidator::validate(config)?;

        let current = match self.store.active_record()? {
            Some(record) => record,
            None => return self.create_config(config, user_id),
        };

        let record =
            self.store.update_active(current.id, current.version, config, user_id, reason)?;
        self.invalidate_cache();

        log::info!(
            "Updated balance configuration {} to version {} (changed by {})",
            record.id,
            record.version,
            user_id
        );
        Ok(record)
    }

    /// Change history, newest first
    ///
    /// Without an explicit id this is the active record's lineage, or empty
    /// when nothing is active.
    pub fn get_config_history(&self, config_id: Option<Uuid>) -> Result<Vec<ConfigHistoryEntry>> {
        let config_id = match config_id {
            Some(id) => id,
            None => match self.store.active_record()? {
                Some(record) => record.id,
                None => return Ok(Vec::new()),
            },
        };

        Ok(self.store.history_for(config_id)?)
    }

    /// Restore the configuration captured in a history entry
    ///
    /// A rollback is a regular update: it validates, appends its own history
    /// entry, and bumps the version, so it can itself be rolled back.
    pub fn rollback_to_entry(&self, entry_id: Uuid, user_id: &str) -> Result<StoredConfigRecord> {
        let entry = self
            .store
            .history_entry(entry_id)?
            .ok_or_else(|| CoreError::NotFound(format!("history entry {}", entry_id)))?;

        let reason =
            format!("Rollback to configuration from {}", entry.created_at.to_rfc3339());
        self.update_active_config(&entry.old_config, user_id, Some(&reason))
    }

    /// Validate a configuration without storing it
    pub fn validate_config(
        &self,
        config: &GameBalanceConfig,
    ) -> std::result::Result<(), ValidationError> {
        ConfigValidator::validate(config)
    }

    /// Drop the cached active configuration
    pub fn invalidate_cache(&self) {
        if let Ok(mut guard) = self.cache.lock() {
            *guard = None;
        }
    }

    /// The active record with its metadata, uncached
    pub fn active_record(&self) -> Result<Option<StoredConfigRecord>> {
        Ok(self.store.active_record()?)
    }

    pub fn has_active_config(&self) -> Result<bool> {
        Ok(self.store.active_record()?.is_some())
    }
}
