//! First-run seeding and reset to defaults

use crate::balance::config::GameBalanceConfig;
use crate::error::Result;

use super::service::BalanceConfigService;
use super::StoredConfigRecord;

/// What `seed_default_config` found and did
#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome {
    /// No configuration was active; the defaults were stored and activated
    Created(StoredConfigRecord),
    /// An active configuration already exists and was left untouched
    AlreadyActive,
}

/// Store the default configuration if nothing is active yet
///
/// Safe to call on every startup; an existing active configuration is never
/// overwritten.
pub fn seed_default_config(
    service: &BalanceConfigService,
    user_id: &str,
) -> Result<SeedOutcome> {
    if service.has_active_config()? {
        log::info!("Active balance configuration already exists, skipping seed");
        return Ok(SeedOutcome::AlreadyActive);
    }

    let record = service.create_config(&GameBalanceConfig::default(), user_id)?;
    log::info!("Default balance configuration seeded");
    Ok(SeedOutcome::Created(record))
}

/// Replace the active configuration with the built-in defaults
///
/// Goes through the normal update path, so the previous values land in the
/// change history and can be rolled back to.
pub fn reset_to_default_config(
    service: &BalanceConfigService,
    user_id: &str,
) -> Result<StoredConfigRecord> {
    service.update_active_config(
        &GameBalanceConfig::default(),
        user_id,
        Some("Reset to default configuration"),
    )
}
