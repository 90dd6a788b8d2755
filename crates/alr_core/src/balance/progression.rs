//! Path level and stat value derivation
//!
//! Both are linear ladders: the path level ladder may give the first level
//! its own XP cost, stat values are a straight division. All derivations are
//! pure and total; divisor guards keep them defined even for a configuration
//! that slipped past validation.

use crate::balance::config::GameBalanceConfig;

/// Progression calculation engine
#[derive(Debug)]
pub struct ProgressionCalculator;

impl ProgressionCalculator {
    /// Path level reached at `global_xp`
    ///
    /// Level 0 below the first-level cost; past it, one level per
    /// `xpPerLevel`. The first level may cost `firstLevelXp` instead when
    /// configured.
    pub fn path_level(global_xp: u64, config: &GameBalanceConfig) -> u32 {
        let xp_per_level = config.path_level_config.xp_per_level.max(1);
        let first_level_xp =
            config.path_level_config.first_level_xp.unwrap_or(xp_per_level).max(1);

        if global_xp < first_level_xp {
            return 0;
        }

        let additional_levels = (global_xp - first_level_xp) / xp_per_level;
        u32::try_from(1 + additional_levels).unwrap_or(u32::MAX)
    }

    /// Shadow path level, on the same scale as the regular path
    pub fn shadow_path_level(shadow_global_xp: u64, config: &GameBalanceConfig) -> u32 {
        Self::path_level(shadow_global_xp, config)
    }

    /// Stat value earned at `stat_xp`
    pub fn stat_value(stat_xp: u64, config: &GameBalanceConfig) -> u64 {
        stat_xp / config.stats_config.xp_per_point.max(1)
    }
}
