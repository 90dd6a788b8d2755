pub mod balance_json;

pub use balance_json::{
    active_config_json, config_history_json, integrity_rating_json, rank_info_json,
    update_active_config_json, validate_config_json, HistoryRequest, IntegrityRatingRequest,
    RankInfoRequest, UpdateConfigRequest, ValidationReport,
};
