//! Rank derivation from XP
//!
//! A value's XP walks an eleven-tier ladder (Common through AscendedStar5)
//! into the open-ended Enlightenment tier. Bands are left-closed: reaching a
//! threshold means holding that rank. Enlightenment levels have a growing
//! per-level cost, so the level is recovered from XP by a closed-form solve
//! that is then verified against the exact integer cost.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::balance::config::{GameBalanceConfig, PersonalValueThresholds, RankPointMap};

/// A value's rank on the progression ladder
///
/// JSON keeps the original union shape: fixed tiers serialize as bare
/// strings, Enlightenment as `{"Enlightenment":{"level":n}}`. The derived
/// order follows tier order with Enlightenment above every fixed tier.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, JsonSchema,
)]
pub enum Rank {
    Common,
    Rare,
    Elite,
    Legendary,
    Mythic,
    Ascended,
    AscendedStar1,
    AscendedStar2,
    AscendedStar3,
    AscendedStar4,
    AscendedStar5,
    Enlightenment { level: u32 },
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Common => write!(f, "Common"),
            Rank::Rare => write!(f, "Rare"),
            Rank::Elite => write!(f, "Elite"),
            Rank::Legendary => write!(f, "Legendary"),
            Rank::Mythic => write!(f, "Mythic"),
            Rank::Ascended => write!(f, "Ascended"),
            Rank::AscendedStar1 => write!(f, "AscendedStar1"),
            Rank::AscendedStar2 => write!(f, "AscendedStar2"),
            Rank::AscendedStar3 => write!(f, "AscendedStar3"),
            Rank::AscendedStar4 => write!(f, "AscendedStar4"),
            Rank::AscendedStar5 => write!(f, "AscendedStar5"),
            Rank::Enlightenment { level } => write!(f, "Enlightenment {}", level),
        }
    }
}

/// Rank plus progress toward the next one, for display surfaces
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankInfo {
    pub rank: Rank,
    pub current_xp: u64,

    /// Total XP at which the next rank (or next Enlightenment level) begins
    pub xp_for_next_rank: u64,

    /// Position within the current band, 0 to 1
    pub progress_to_next_rank: f64,
}

/// Rank calculation engine
#[derive(Debug)]
pub struct RankCalculator;

impl RankCalculator {
    /// Derive the rank for a personal value from its XP
    pub fn rank_from_xp(xp: u64, thresholds: &PersonalValueThresholds) -> Rank {
        if xp < thresholds.rare {
            return Rank::Common;
        }
        if xp < thresholds.elite {
            return Rank::Rare;
        }
        if xp < thresholds.legendary {
            return Rank::Elite;
        }
        if xp < thresholds.mythic {
            return Rank::Legendary;
        }
        if xp < thresholds.ascended {
            return Rank::Mythic;
        }
        if xp < thresholds.ascended_star1 {
            return Rank::Ascended;
        }
        if xp < thresholds.ascended_star2 {
            return Rank::AscendedStar1;
        }
        if xp < thresholds.ascended_star3 {
            return Rank::AscendedStar2;
        }
        if xp < thresholds.ascended_star4 {
            return Rank::AscendedStar3;
        }
        if xp < thresholds.ascended_star5 {
            return Rank::AscendedStar4;
        }
        if xp < thresholds.enlightenment_base {
            return Rank::AscendedStar5;
        }

        let level = Self::enlightenment_level(
            xp,
            thresholds.enlightenment_base,
            thresholds.enlightenment_increment,
        );

        Rank::Enlightenment { level }
    }

    /// Enlightenment level reached at `xp`
    ///
    /// Beyond the base, level n costs `n*increment + 5*n*(n-1)` extra XP
    /// (each level costs 10 more than the one before it). The closed form
    /// solves `5n^2 + (increment-5)n - xp_beyond = 0`; the candidate is then
    /// walked against the exact integer cost so float error near a boundary
    /// cannot shift the level. Reaching the base itself is level 1.
    pub fn enlightenment_level(xp: u64, base: u64, increment: u64) -> u32 {
        if xp < base {
            return 0;
        }

        let increment = increment.max(1);
        let xp_beyond = (xp - base) as u128;
        if xp_beyond < increment as u128 {
            return 1;
        }

        let a = 5.0;
        let b = increment as f64 - 5.0;
        let c = -(xp_beyond as f64);

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return 1;
        }

        let mut level = (((-b + discriminant.sqrt()) / (2.0 * a)).floor().max(1.0)) as u64;

        let cost = |n: u64| -> u128 {
            let n = n as u128;
            n * increment as u128 + 5 * n * (n - 1)
        };

        // cost(1) == increment <= xp_beyond past the early return, so the
        // downward walk floors at level 1
        while cost(level) > xp_beyond {
            level -= 1;
        }
        while cost(level + 1) <= xp_beyond {
            level += 1;
        }

        level as u32
    }

    /// Total XP at which an Enlightenment level begins
    ///
    /// Level 0 and below map to the base threshold.
    pub fn enlightenment_xp_for_level(level: u32, base: u64, increment: u64) -> u64 {
        if level == 0 {
            return base;
        }

        let level = level as u128;
        let total = base as u128 + level * increment as u128 + 5 * level * (level - 1);
        u64::try_from(total).unwrap_or(u64::MAX)
    }

    /// Points a rank contributes to the Integrity Rating
    pub fn rank_points(rank: Rank, map: &RankPointMap) -> f64 {
        match rank {
            Rank::Common => map.common,
            Rank::Rare => map.rare,
            Rank::Elite => map.elite,
            Rank::Legendary => map.legendary,
            Rank::Mythic => map.mythic,
            Rank::Ascended => map.ascended,
            Rank::AscendedStar1 => map.ascended + map.ascended_star,
            Rank::AscendedStar2 => map.ascended + 2.0 * map.ascended_star,
            Rank::AscendedStar3 => map.ascended + 3.0 * map.ascended_star,
            Rank::AscendedStar4 => map.ascended + 4.0 * map.ascended_star,
            Rank::AscendedStar5 => map.ascended + 5.0 * map.ascended_star,
            Rank::Enlightenment { level } => {
                map.enlightenment + level as f64 * map.enlightenment_increment
            }
        }
    }

    /// Rank with band boundaries and progress
    pub fn rank_info(xp: u64, thresholds: &PersonalValueThresholds) -> RankInfo {
        let rank = Self::rank_from_xp(xp, thresholds);

        let (band_start, band_end) = match rank {
            Rank::Common => (thresholds.common, thresholds.rare),
            Rank::Rare => (thresholds.rare, thresholds.elite),
            Rank::Elite => (thresholds.elite, thresholds.legendary),
            Rank::Legendary => (thresholds.legendary, thresholds.mythic),
            Rank::Mythic => (thresholds.mythic, thresholds.ascended),
            Rank::Ascended => (thresholds.ascended, thresholds.ascended_star1),
            Rank::AscendedStar1 => (thresholds.ascended_star1, thresholds.ascended_star2),
            Rank::AscendedStar2 => (thresholds.ascended_star2, thresholds.ascended_star3),
            Rank::AscendedStar3 => (thresholds.ascended_star3, thresholds.ascended_star4),
            Rank::AscendedStar4 => (thresholds.ascended_star4, thresholds.ascended_star5),
            Rank::AscendedStar5 => (thresholds.ascended_star5, thresholds.enlightenment_base),
            Rank::Enlightenment { level } => (
                Self::enlightenment_xp_for_level(
                    level,
                    thresholds.enlightenment_base,
                    thresholds.enlightenment_increment,
                ),
                Self::enlightenment_xp_for_level(
                    level + 1,
                    thresholds.enlightenment_base,
                    thresholds.enlightenment_increment,
                ),
            ),
        };

        RankInfo {
            rank,
            current_xp: xp,
            xp_for_next_rank: band_end,
            progress_to_next_rank: band_progress(xp, band_start, band_end),
        }
    }

    /// Rank for a core value
    ///
    /// Core values climb the personal ladder scaled by the core value
    /// multiplier.
    pub fn core_value_rank_from_xp(xp: u64, config: &GameBalanceConfig) -> Rank {
        let scaled =
            config.personal_value_thresholds.scaled(config.core_value_config.multiplier);
        Self::rank_from_xp(xp, &scaled)
    }
}

/// Linear position of `xp` inside a band, clamped to [0, 1]
///
/// A zero-width band counts as complete; XP below the band floor reports 0
/// (reachable for Common when its threshold sits above 0).
fn band_progress(xp: u64, band_start: u64, band_end: u64) -> f64 {
    if band_end <= band_start {
        return 1.0;
    }

    let gained = xp.saturating_sub(band_start) as f64;
    let needed = (band_end - band_start) as f64;
    (gained / needed).min(1.0)
}
