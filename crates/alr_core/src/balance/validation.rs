//! Validation for game balance configuration
//!
//! Structural checks (field presence, unknown fields, integer ranges) are
//! enforced by serde at the deserialization boundary; this module covers the
//! business rules on top. Every violation is collected so an admin sees the
//! full list in one pass instead of fixing fields one at a time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::balance::config::{
    CoreValueConfig, GameBalanceConfig, IntegrityRatingWeights, PathLevelConfig,
    PersonalValueThresholds, StatsConfig,
};

/// A single field-level rule violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// JSON path of the offending field, e.g. `coreValueConfig.multiplier`
    pub field: String,
    pub message: String,
}

/// All rule violations found in one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> =
            self.issues.iter().map(|issue| format!("{}: {}", issue.field, issue.message)).collect();
        write!(f, "Invalid configuration: {}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationError {}

fn issue(issues: &mut Vec<ValidationIssue>, field: &str, message: &str) {
    issues.push(ValidationIssue { field: field.to_string(), message: message.to_string() });
}

/// Balance configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a full configuration, collecting every violation
    pub fn validate(config: &GameBalanceConfig) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        Self::check_thresholds(&config.personal_value_thresholds, &mut issues);
        Self::check_core_value(&config.core_value_config, &mut issues);
        Self::check_path_level(&config.path_level_config, &mut issues);
        Self::check_stats(&config.stats_config, &mut issues);
        Self::check_weights(&config.integrity_weights, &mut issues);

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Thresholds must be non-decreasing along the tier order
    fn check_thresholds(thresholds: &PersonalValueThresholds, issues: &mut Vec<ValidationIssue>) {
        let chain = [
            thresholds.common,
            thresholds.rare,
            thresholds.elite,
            thresholds.legendary,
            thresholds.mythic,
            thresholds.ascended,
            thresholds.ascended_star1,
            thresholds.ascended_star2,
            thresholds.ascended_star3,
            thresholds.ascended_star4,
            thresholds.ascended_star5,
            thresholds.enlightenment_base,
        ];

        if chain.windows(2).any(|pair| pair[1] < pair[0]) {
            issue(
                issues,
                "personalValueThresholds",
                "XP thresholds must be in ascending order",
            );
        }

        if thresholds.enlightenment_increment < 1 {
            issue(
                issues,
                "personalValueThresholds.EnlightenmentIncrement",
                "must be at least 1",
            );
        }
    }

    fn check_core_value(config: &CoreValueConfig, issues: &mut Vec<ValidationIssue>) {
        if !config.multiplier.is_finite() {
            issue(issues, "coreValueConfig.multiplier", "must be a finite number");
        } else if !(1.0..=100.0).contains(&config.multiplier) {
            issue(issues, "coreValueConfig.multiplier", "must be between 1 and 100");
        }
    }

    fn check_path_level(config: &PathLevelConfig, issues: &mut Vec<ValidationIssue>) {
        if config.xp_per_level < 1 {
            issue(issues, "pathLevelConfig.xpPerLevel", "must be at least 1");
        }

        if let Some(first_level_xp) = config.first_level_xp {
            if first_level_xp < 1 {
                issue(issues, "pathLevelConfig.firstLevelXp", "must be at least 1");
            }
        }
    }

    fn check_stats(config: &StatsConfig, issues: &mut Vec<ValidationIssue>) {
        if config.xp_per_point < 1 {
            issue(issues, "statsConfig.xpPerPoint", "must be at least 1");
        }

        if !config.shadow_mitigation_factor.is_finite() {
            issue(issues, "statsConfig.shadowMitigationFactor", "must be a finite number");
        } else if !(0.0..=1.0).contains(&config.shadow_mitigation_factor) {
            issue(issues, "statsConfig.shadowMitigationFactor", "must be between 0 and 1");
        }
    }

    /// Path level weights may carry any sign; rank and stat weights must be
    /// non-negative, as must every rank point value
    fn check_weights(weights: &IntegrityRatingWeights, issues: &mut Vec<ValidationIssue>) {
        if !weights.path_level.is_finite() {
            issue(issues, "integrityWeights.pathLevel", "must be a finite number");
        }
        if !weights.shadow_path_level.is_finite() {
            issue(issues, "integrityWeights.shadowPathLevel", "must be a finite number");
        }

        if !weights.core_value_rank.is_finite() {
            issue(issues, "integrityWeights.coreValueRank", "must be a finite number");
        } else if weights.core_value_rank < 0.0 {
            issue(issues, "integrityWeights.coreValueRank", "must not be negative");
        }

        if !weights.stat_point.is_finite() {
            issue(issues, "integrityWeights.statPoint", "must be a finite number");
        } else if weights.stat_point < 0.0 {
            issue(issues, "integrityWeights.statPoint", "must not be negative");
        }

        let map = &weights.rank_point_map;
        let entries = [
            ("Common", map.common),
            ("Rare", map.rare),
            ("Elite", map.elite),
            ("Legendary", map.legendary),
            ("Mythic", map.mythic),
            ("Ascended", map.ascended),
            ("AscendedStar", map.ascended_star),
            ("Enlightenment", map.enlightenment),
            ("EnlightenmentIncrement", map.enlightenment_increment),
        ];

        for (name, value) in entries {
            let field = format!("integrityWeights.rankPointMap.{}", name);
            if !value.is_finite() {
                issue(issues, &field, "must be a finite number");
            } else if value < 0.0 {
                issue(issues, &field, "must not be negative");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&GameBalanceConfig::default()).is_ok());
    }

    #[test]
    fn test_descending_thresholds_rejected() {
        let mut config = GameBalanceConfig::default();
        config.personal_value_thresholds.rare = 200;
        config.personal_value_thresholds.elite = 100;

        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].field, "personalValueThresholds");
        assert!(err.issues[0].message.contains("ascending order"));
    }

    #[test]
    fn test_equal_adjacent_thresholds_allowed() {
        let mut config = GameBalanceConfig::default();
        config.personal_value_thresholds.ascended_star5 = 2750;
        config.personal_value_thresholds.enlightenment_base = 2750;

        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_enlightenment_increment_rejected() {
        let mut config = GameBalanceConfig::default();
        config.personal_value_thresholds.enlightenment_increment = 0;

        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(err.issues[0].field, "personalValueThresholds.EnlightenmentIncrement");
    }

    #[test]
    fn test_multiplier_bounds() {
        let mut config = GameBalanceConfig::default();

        config.core_value_config.multiplier = 0.5;
        assert!(ConfigValidator::validate(&config).is_err());

        config.core_value_config.multiplier = 1.0;
        assert!(ConfigValidator::validate(&config).is_ok());

        config.core_value_config.multiplier = 100.0;
        assert!(ConfigValidator::validate(&config).is_ok());

        config.core_value_config.multiplier = 100.5;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_nan_multiplier_rejected_once() {
        let mut config = GameBalanceConfig::default();
        config.core_value_config.multiplier = f64::NAN;

        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(err.issues[0].message.contains("finite"));
    }

    #[test]
    fn test_zero_xp_per_level_rejected() {
        let mut config = GameBalanceConfig::default();
        config.path_level_config.xp_per_level = 0;

        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_first_level_xp_must_be_positive_when_present() {
        let mut config = GameBalanceConfig::default();

        config.path_level_config.first_level_xp = Some(0);
        assert!(ConfigValidator::validate(&config).is_err());

        config.path_level_config.first_level_xp = Some(1);
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_shadow_mitigation_factor_bounds() {
        let mut config = GameBalanceConfig::default();

        config.stats_config.shadow_mitigation_factor = 1.5;
        assert!(ConfigValidator::validate(&config).is_err());

        config.stats_config.shadow_mitigation_factor = -0.1;
        assert!(ConfigValidator::validate(&config).is_err());

        config.stats_config.shadow_mitigation_factor = 1.0;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_negative_rank_points_rejected() {
        let mut config = GameBalanceConfig::default();
        config.integrity_weights.rank_point_map.ascended_star = -0.5;

        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(err.issues[0].field, "integrityWeights.rankPointMap.AscendedStar");
    }

    #[test]
    fn test_negative_path_level_weights_allowed() {
        let mut config = GameBalanceConfig::default();
        config.integrity_weights.path_level = -3.0;
        config.integrity_weights.shadow_path_level = 2.0;

        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_negative_stat_point_weight_rejected() {
        let mut config = GameBalanceConfig::default();
        config.integrity_weights.stat_point = -0.5;

        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_all_violations_collected() {
        let mut config = GameBalanceConfig::default();
        config.personal_value_thresholds.enlightenment_increment = 0;
        config.core_value_config.multiplier = 0.0;
        config.stats_config.xp_per_point = 0;

        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(err.issues.len(), 3);
    }

    #[test]
    fn test_display_lists_every_issue() {
        let mut config = GameBalanceConfig::default();
        config.core_value_config.multiplier = 0.0;
        config.stats_config.xp_per_point = 0;

        let err = ConfigValidator::validate(&config).unwrap_err();
        let rendered = err.to_string();

        assert!(rendered.contains("coreValueConfig.multiplier"));
        assert!(rendered.contains("statsConfig.xpPerPoint"));
    }
}
