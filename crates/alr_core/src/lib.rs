//! # alr_core - ACT Life RPG Balance & Progression Engine
//!
//! This library provides the deterministic balance engine behind the life
//! RPG: XP-to-rank resolution over the tier ladder and the open-ended
//! Enlightenment levels, path level and stat progression, and the aggregate
//! Integrity Rating, together with a versioned store for the balance
//! configuration that drives all of them.
//!
//! ## Features
//! - Pure, total calculators over validated configurations
//! - Versioned configuration records with change history and rollback
//! - Compressed, checksummed single-file persistence
//! - JSON API for easy integration

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod balance;
pub mod error;
pub mod store;

// Re-export the JSON API surface
pub use api::{
    active_config_json, config_history_json, integrity_rating_json, rank_info_json,
    update_active_config_json, validate_config_json,
};

// Re-export the balance engine
pub use balance::{
    ConfigValidator, CoreValueConfig, GameBalanceConfig, IntegrityBreakdown, IntegrityCalculator,
    IntegrityRatingWeights, PathLevelConfig, PersonalValueThresholds, ProgressionCalculator, Rank,
    RankCalculator, RankInfo, RankPointMap, StatsConfig, UserProgress, ValidationError,
    ValidationIssue,
};

// Re-export the configuration store
pub use store::{
    reset_to_default_config, seed_default_config, BalanceConfigService, ConfigHistoryEntry,
    ConfigStore, FileConfigStore, MemoryConfigStore, SeedOutcome, StoreError, StoredConfigRecord,
};

pub use error::{CoreError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
