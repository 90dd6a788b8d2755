// Versioned configuration store
// Record/history model, the storage boundary trait, and the built-in
// in-memory and single-file adapters behind it

pub mod error;
pub mod file;
pub mod format;
pub mod memory;
pub mod migration;
pub mod seed;
pub mod service;

pub use error::StoreError;
pub use file::FileConfigStore;
pub use format::{decompress_and_deserialize, serialize_and_compress, ConfigDocument};
pub use memory::MemoryConfigStore;
pub use migration::migrate_document;
pub use seed::{reset_to_default_config, seed_default_config, SeedOutcome};
pub use service::{BalanceConfigService, DEFAULT_CACHE_TTL};

/// Current on-disk document format version
pub const DOC_VERSION: u32 = 1;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::balance::config::GameBalanceConfig;

/// A stored configuration with its lifecycle metadata
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredConfigRecord {
    pub id: Uuid,
    pub config: GameBalanceConfig,

    /// At most one record in a store is active at any time
    pub is_active: bool,

    /// Starts at 1, incremented by every applied update
    pub version: u32,

    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry in the append-only change history
///
/// Both snapshots are stored in full so any entry can be rolled back to
/// without replaying the chain.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigHistoryEntry {
    pub id: Uuid,
    pub config_id: Uuid,
    pub old_config: GameBalanceConfig,
    pub new_config: GameBalanceConfig,
    pub changed_by: String,
    pub change_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Storage boundary for configuration records
///
/// Each call is atomic: the compound sequences (deactivate-then-insert,
/// append-history-then-mutate) happen inside one critical section of the
/// implementation. `update_active` carries the version the caller read so a
/// write that raced another one fails with `StoreError::Conflict` instead of
/// silently overwriting.
pub trait ConfigStore: Send + Sync {
    /// The single active record, if any
    fn active_record(&self) -> Result<Option<StoredConfigRecord>, StoreError>;

    fn record_by_id(&self, id: Uuid) -> Result<Option<StoredConfigRecord>, StoreError>;

    /// Deactivate every record and insert a fresh active one at version 1
    fn create_active(
        &self,
        config: &GameBalanceConfig,
        created_by: &str,
    ) -> Result<StoredConfigRecord, StoreError>;

    /// Append a history entry and apply the new config to the active record
    fn update_active(
        &self,
        record_id: Uuid,
        expected_version: u32,
        config: &GameBalanceConfig,
        changed_by: &str,
        reason: Option<&str>,
    ) -> Result<StoredConfigRecord, StoreError>;

    /// Change history for a record lineage, newest first; unknown ids yield
    /// an empty list
    fn history_for(&self, config_id: Uuid) -> Result<Vec<ConfigHistoryEntry>, StoreError>;

    fn history_entry(&self, entry_id: Uuid) -> Result<Option<ConfigHistoryEntry>, StoreError>;
}
