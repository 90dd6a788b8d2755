//! Integrity Rating aggregation
//!
//! The Integrity Rating folds a user's whole progression state into a single
//! score: path levels add, shadow path levels subtract (the weight itself is
//! negative), net core value rank points and net stat points are weighted in,
//! and the result is rounded once at the end to two decimals.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::balance::config::GameBalanceConfig;
use crate::balance::rank::RankCalculator;

/// Snapshot of a user's progression state
///
/// Transient input to the aggregation; the engine holds no user state.
/// Missing fields deserialize to their empty defaults so partial snapshots
/// are accepted.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct UserProgress {
    pub path_level: u32,
    pub shadow_path_level: u32,

    /// Core value id -> accumulated light XP
    pub core_value_light_xp: HashMap<String, u64>,

    /// Core value id -> accumulated shadow XP
    pub core_value_shadow_xp: HashMap<String, u64>,

    /// Stat id -> current light stat value
    pub light_stat_values: HashMap<String, f64>,

    /// Stat id -> current shadow stat value
    pub shadow_stat_values: HashMap<String, f64>,
}

/// Contribution terms of one Integrity Rating
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityBreakdown {
    pub path_level_contribution: f64,
    pub shadow_path_penalty: f64,
    pub core_value_contribution: f64,
    pub stat_contribution: f64,

    /// Rounded total, identical to `IntegrityCalculator::integrity_rating`
    pub total: f64,
}

/// Integrity Rating aggregation engine
#[derive(Debug)]
pub struct IntegrityCalculator;

impl IntegrityCalculator {
    /// Aggregate a progress snapshot into the Integrity Rating
    pub fn integrity_rating(progress: &UserProgress, config: &GameBalanceConfig) -> f64 {
        Self::integrity_breakdown(progress, config).total
    }

    /// Aggregate with the individual contribution terms exposed
    pub fn integrity_breakdown(
        progress: &UserProgress,
        config: &GameBalanceConfig,
    ) -> IntegrityBreakdown {
        let weights = &config.integrity_weights;

        let path_level_contribution = progress.path_level as f64 * weights.path_level;
        let shadow_path_penalty = progress.shadow_path_level as f64 * weights.shadow_path_level;

        // Core values rank on the scaled ladder; scale once for both sides
        let scaled =
            config.personal_value_thresholds.scaled(config.core_value_config.multiplier);

        let mut core_light_score = 0.0;
        for xp in progress.core_value_light_xp.values() {
            let rank = RankCalculator::rank_from_xp(*xp, &scaled);
            core_light_score += RankCalculator::rank_points(rank, &weights.rank_point_map);
        }

        let mut core_shadow_score = 0.0;
        for xp in progress.core_value_shadow_xp.values() {
            let rank = RankCalculator::rank_from_xp(*xp, &scaled);
            core_shadow_score += RankCalculator::rank_points(rank, &weights.rank_point_map);
        }

        let core_value_contribution =
            (core_light_score - core_shadow_score) * weights.core_value_rank;

        let total_light_stats: f64 = progress.light_stat_values.values().sum();
        let total_shadow_stats: f64 = progress.shadow_stat_values.values().sum();
        let stat_contribution = (total_light_stats - total_shadow_stats) * weights.stat_point;

        let total = round2(
            path_level_contribution
                + shadow_path_penalty
                + core_value_contribution
                + stat_contribution,
        );

        IntegrityBreakdown {
            path_level_contribution,
            shadow_path_penalty,
            core_value_contribution,
            stat_contribution,
            total,
        }
    }
}

/// Round half-up to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
