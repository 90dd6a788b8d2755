//! JSON API for balance operations
//!
//! String-in/string-out functions for embedding hosts that cannot link
//! against the typed API. Success returns the serialized payload; failure
//! returns `{"error": "..."}`. Functions that touch stored state take the
//! service as an explicit argument.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::balance::config::{GameBalanceConfig, PersonalValueThresholds};
use crate::balance::rank::RankCalculator;
use crate::balance::rating::{IntegrityCalculator, UserProgress};
use crate::balance::validation::{ConfigValidator, ValidationIssue};
use crate::store::service::BalanceConfigService;

fn error_json(message: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

fn to_json<T: Serialize>(payload: &T) -> String {
    match serde_json::to_string(payload) {
        Ok(json) => json,
        Err(e) => error_json(format!("Failed to serialize response: {}", e)),
    }
}

/// Verdict returned by `validate_config_json`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateConfigRequest {
    pub config: GameBalanceConfig,
    pub user_id: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct HistoryRequest {
    pub config_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RankInfoRequest {
    pub xp: u64,
    /// Thresholds to rank against; the built-in defaults when omitted
    #[serde(default)]
    pub thresholds: Option<PersonalValueThresholds>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IntegrityRatingRequest {
    pub progress: UserProgress,
    /// Configuration to rate against; the built-in defaults when omitted
    #[serde(default)]
    pub config: Option<GameBalanceConfig>,
}

/// The active configuration as JSON
pub fn active_config_json(service: &BalanceConfigService) -> String {
    to_json(&service.get_active_config())
}

/// Validate a configuration document, reporting every violation
pub fn validate_config_json(request_json: &str) -> String {
    let config: GameBalanceConfig = match serde_json::from_str(request_json) {
        Ok(config) => config,
        Err(e) => return error_json(format!("Invalid JSON request: {}", e)),
    };

    let report = match ConfigValidator::validate(&config) {
        Ok(()) => ValidationReport { valid: true, issues: Vec::new() },
        Err(err) => ValidationReport { valid: false, issues: err.issues },
    };
    to_json(&report)
}

/// Replace the active configuration; returns the stored record
pub fn update_active_config_json(service: &BalanceConfigService, request_json: &str) -> String {
    let request: UpdateConfigRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(e) => return error_json(format!("Invalid JSON request: {}", e)),
    };

    match service.update_active_config(
        &request.config,
        &request.user_id,
        request.reason.as_deref(),
    ) {
        Ok(record) => to_json(&record),
        Err(err) => error_json(err),
    }
}

/// Change history, newest first; `{}` selects the active lineage
pub fn config_history_json(service: &BalanceConfigService, request_json: &str) -> String {
    let request: HistoryRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(e) => return error_json(format!("Invalid JSON request: {}", e)),
    };

    match service.get_config_history(request.config_id) {
        Ok(history) => to_json(&history),
        Err(err) => error_json(err),
    }
}

/// Rank, band boundaries, and progress for an XP total
pub fn rank_info_json(request_json: &str) -> String {
    let request: RankInfoRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(e) => return error_json(format!("Invalid JSON request: {}", e)),
    };

    let thresholds = request.thresholds.unwrap_or_default();
    to_json(&RankCalculator::rank_info(request.xp, &thresholds))
}

/// Integrity Rating with its per-term breakdown
pub fn integrity_rating_json(request_json: &str) -> String {
    let request: IntegrityRatingRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(e) => return error_json(format!("Invalid JSON request: {}", e)),
    };

    let config = request.config.unwrap_or_default();
    to_json(&IntegrityCalculator::integrity_breakdown(&request.progress, &config))
}
