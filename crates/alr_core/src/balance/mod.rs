// Balance engine: configuration, validation, and the pure calculators

pub mod config;
pub mod progression;
pub mod rank;
pub mod rating;
pub mod validation;

pub use config::{
    CoreValueConfig, GameBalanceConfig, IntegrityRatingWeights, PathLevelConfig,
    PersonalValueThresholds, RankPointMap, StatsConfig,
};
pub use progression::ProgressionCalculator;
pub use rank::{Rank, RankCalculator, RankInfo};
pub use rating::{IntegrityBreakdown, IntegrityCalculator, UserProgress};
pub use validation::{ConfigValidator, ValidationError, ValidationIssue};
