//! Game balance configuration types and built-in defaults
//!
//! The configuration is a versioned value object: every tuning knob for rank
//! thresholds, path levels, stats and the Integrity Rating lives here.
//! Serialized JSON keeps the original field names (camelCase containers,
//! PascalCase rank names) so stored documents and admin payloads stay
//! compatible across layers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// XP thresholds for the personal value rank ladder
///
/// Thresholds are left-closed: a value holding `xp` is in rank R when
/// `xp >= threshold(R)` and `xp < threshold(next(R))`. `EnlightenmentBase`
/// opens the unbounded Enlightenment tier; `EnlightenmentIncrement` is the
/// level-1 step of its growing per-level cost.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct PersonalValueThresholds {
    pub common: u64,
    pub rare: u64,
    pub elite: u64,
    pub legendary: u64,
    pub mythic: u64,
    pub ascended: u64,
    pub ascended_star1: u64,
    pub ascended_star2: u64,
    pub ascended_star3: u64,
    pub ascended_star4: u64,
    pub ascended_star5: u64,
    pub enlightenment_base: u64,
    pub enlightenment_increment: u64,
}

impl PersonalValueThresholds {
    /// Scale every threshold for core values
    ///
    /// Each boundary becomes the first integer XP at or above
    /// `threshold * multiplier`, so left-closed band semantics survive
    /// fractional multipliers.
    pub fn scaled(&self, multiplier: f64) -> PersonalValueThresholds {
        let scale = |t: u64| (t as f64 * multiplier).ceil() as u64;

        PersonalValueThresholds {
            common: scale(self.common),
            rare: scale(self.rare),
            elite: scale(self.elite),
            legendary: scale(self.legendary),
            mythic: scale(self.mythic),
            ascended: scale(self.ascended),
            ascended_star1: scale(self.ascended_star1),
            ascended_star2: scale(self.ascended_star2),
            ascended_star3: scale(self.ascended_star3),
            ascended_star4: scale(self.ascended_star4),
            ascended_star5: scale(self.ascended_star5),
            enlightenment_base: scale(self.enlightenment_base),
            enlightenment_increment: scale(self.enlightenment_increment),
        }
    }
}

impl Default for PersonalValueThresholds {
    fn default() -> Self {
        Self {
            common: 0,
            rare: 50,
            elite: 150,
            legendary: 300,
            mythic: 500,
            ascended: 750,
            ascended_star1: 1050,
            ascended_star2: 1400,
            ascended_star3: 1800,
            ascended_star4: 2250,
            ascended_star5: 2750,
            enlightenment_base: 2850,
            enlightenment_increment: 10,
        }
    }
}

/// Core value tuning relative to personal values
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CoreValueConfig {
    /// Multiplier applied to every personal value threshold (e.g. 6x)
    pub multiplier: f64,
}

impl Default for CoreValueConfig {
    fn default() -> Self {
        Self { multiplier: 6.0 }
    }
}

/// Path level progression tuning
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PathLevelConfig {
    /// XP required per path level (e.g. 600)
    pub xp_per_level: u64,

    /// Optional different XP requirement for the first level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_level_xp: Option<u64>,
}

impl Default for PathLevelConfig {
    fn default() -> Self {
        Self { xp_per_level: 600, first_level_xp: None }
    }
}

/// Stat point tuning
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatsConfig {
    /// XP required per stat point (e.g. 50)
    pub xp_per_point: u64,

    /// Factor for shadow XP mitigation (0.1 = 10%). Reserved tuning knob;
    /// validated but not consumed by the current aggregation.
    pub shadow_mitigation_factor: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { xp_per_point: 50, shadow_mitigation_factor: 0.1 }
    }
}

/// Points granted per rank when aggregating the Integrity Rating
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct RankPointMap {
    pub common: f64,
    pub rare: f64,
    pub elite: f64,
    pub legendary: f64,
    pub mythic: f64,
    pub ascended: f64,
    /// Added per star on top of the Ascended base
    pub ascended_star: f64,
    /// Base points for Enlightenment
    pub enlightenment: f64,
    /// Added per Enlightenment level
    pub enlightenment_increment: f64,
}

impl Default for RankPointMap {
    fn default() -> Self {
        Self {
            common: 1.0,
            rare: 2.0,
            elite: 3.0,
            legendary: 4.0,
            mythic: 5.0,
            ascended: 6.0,
            ascended_star: 0.5,
            enlightenment: 7.0,
            enlightenment_increment: 0.5,
        }
    }
}

/// Weights for the Integrity Rating aggregation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IntegrityRatingWeights {
    /// Points per path level (e.g. 10)
    pub path_level: f64,

    /// Points per shadow path level, normally negative (e.g. -10)
    pub shadow_path_level: f64,

    /// Multiplier for net core value rank points (e.g. 5)
    pub core_value_rank: f64,

    /// Points per net stat point (e.g. 0.5)
    pub stat_point: f64,

    pub rank_point_map: RankPointMap,
}

impl Default for IntegrityRatingWeights {
    fn default() -> Self {
        Self {
            path_level: 10.0,
            shadow_path_level: -10.0,
            core_value_rank: 5.0,
            stat_point: 0.5,
            rank_point_map: RankPointMap::default(),
        }
    }
}

/// Complete game balance configuration
///
/// `Default` yields the production baseline used when no stored
/// configuration is active.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GameBalanceConfig {
    pub personal_value_thresholds: PersonalValueThresholds,
    pub core_value_config: CoreValueConfig,
    pub path_level_config: PathLevelConfig,
    pub stats_config: StatsConfig,
    pub integrity_weights: IntegrityRatingWeights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values_match_baseline() {
        let config = GameBalanceConfig::default();

        assert_eq!(config.personal_value_thresholds.common, 0);
        assert_eq!(config.personal_value_thresholds.rare, 50);
        assert_eq!(config.personal_value_thresholds.ascended_star5, 2750);
        assert_eq!(config.personal_value_thresholds.enlightenment_base, 2850);
        assert_eq!(config.personal_value_thresholds.enlightenment_increment, 10);
        assert_eq!(config.core_value_config.multiplier, 6.0);
        assert_eq!(config.path_level_config.xp_per_level, 600);
        assert_eq!(config.path_level_config.first_level_xp, None);
        assert_eq!(config.stats_config.xp_per_point, 50);
        assert_eq!(config.stats_config.shadow_mitigation_factor, 0.1);
        assert_eq!(config.integrity_weights.path_level, 10.0);
        assert_eq!(config.integrity_weights.shadow_path_level, -10.0);
        assert_eq!(config.integrity_weights.rank_point_map.ascended_star, 0.5);
        assert_eq!(config.integrity_weights.rank_point_map.enlightenment, 7.0);
    }

    #[test]
    fn test_json_field_names() {
        let config = GameBalanceConfig::default();
        let value = serde_json::to_value(&config).unwrap();

        // Containers are camelCase, rank names are PascalCase
        assert_eq!(value["personalValueThresholds"]["Common"], 0);
        assert_eq!(value["personalValueThresholds"]["AscendedStar1"], 1050);
        assert_eq!(value["personalValueThresholds"]["EnlightenmentBase"], 2850);
        assert_eq!(value["coreValueConfig"]["multiplier"], 6.0);
        assert_eq!(value["pathLevelConfig"]["xpPerLevel"], 600);
        assert_eq!(value["statsConfig"]["shadowMitigationFactor"], 0.1);
        assert_eq!(value["integrityWeights"]["shadowPathLevel"], -10.0);
        assert_eq!(value["integrityWeights"]["rankPointMap"]["AscendedStar"], 0.5);

        // Unset optional field is omitted entirely
        assert!(value["pathLevelConfig"].get("firstLevelXp").is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameBalanceConfig::default();

        let json = serde_json::to_string(&config).unwrap();
        let parsed: GameBalanceConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let mut value = serde_json::to_value(GameBalanceConfig::default()).unwrap();
        value["bonusXp"] = serde_json::json!(9000);

        let result: Result<GameBalanceConfig, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_scaled_thresholds_integer_multiplier() {
        let thresholds = PersonalValueThresholds::default();
        let scaled = thresholds.scaled(6.0);

        assert_eq!(scaled.common, 0);
        assert_eq!(scaled.rare, 300);
        assert_eq!(scaled.elite, 900);
        assert_eq!(scaled.legendary, 1800);
        assert_eq!(scaled.mythic, 3000);
        assert_eq!(scaled.ascended, 4500);
        assert_eq!(scaled.ascended_star5, 16500);
        assert_eq!(scaled.enlightenment_base, 17100);
        assert_eq!(scaled.enlightenment_increment, 60);
    }

    #[test]
    fn test_scaled_thresholds_fractional_multiplier_rounds_up() {
        let thresholds = PersonalValueThresholds { rare: 51, ..Default::default() };
        let scaled = thresholds.scaled(1.5);

        // 51 * 1.5 = 76.5; the first integer XP past the boundary is 77
        assert_eq!(scaled.rare, 77);
        // 150 * 1.5 = 225 exactly
        assert_eq!(scaled.elite, 225);
    }

    #[test]
    fn test_schema_accepts_default_config() {
        let schema = schemars::schema_for!(GameBalanceConfig);
        let schema_value = serde_json::to_value(&schema).unwrap();
        let compiled = jsonschema::JSONSchema::compile(&schema_value).unwrap();

        let config_value = serde_json::to_value(GameBalanceConfig::default()).unwrap();
        assert!(compiled.is_valid(&config_value));
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: configs survive the JSON boundary unchanged
            #[test]
            fn prop_config_json_roundtrip(
                rare in 1u64..1_000,
                increment in 1u64..100,
                multiplier in 1.0f64..100.0,
                xp_per_level in 1u64..10_000,
                first_level_xp in proptest::option::of(1u64..10_000),
                stat_point in 0.0f64..10.0,
            ) {
                let mut config = GameBalanceConfig::default();
                config.personal_value_thresholds.rare = rare;
                config.personal_value_thresholds.enlightenment_increment = increment;
                config.core_value_config.multiplier = multiplier;
                config.path_level_config.xp_per_level = xp_per_level;
                config.path_level_config.first_level_xp = first_level_xp;
                config.integrity_weights.stat_point = stat_point;

                let json = serde_json::to_string(&config).unwrap();
                let parsed: GameBalanceConfig = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(config, parsed);
            }
        }
    }
}
