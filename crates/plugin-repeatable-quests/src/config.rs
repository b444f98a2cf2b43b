//! Tuning configuration for the repeatable quest plugin.
//!
//! The document is a flat JSON object with PascalCase keys, loaded once at
//! plugin load. Every option is required: an absent multiplier is a caller
//! error, never a silent zero — a zero'd multiplier would erase rewards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use raidhub_core::AppError;
use raidhub_core::config::CategoryKind;
use raidhub_core::error::ErrorKind;

/// Errors raised while loading the tuning document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// The path that was probed.
        path: PathBuf,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[source] std::io::Error),

    /// The configuration file is not valid JSON for the expected schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[source] serde_json::Error),

    /// A required option is absent.
    #[error("required option '{0}' is missing from the configuration")]
    MissingOption(&'static str),

    /// An option is present but out of range.
    #[error("option '{field}' is out of range")]
    InvalidOption {
        /// The offending field, in document naming.
        field: String,
    },
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        AppError::with_source(ErrorKind::Configuration, message, err)
    }
}

/// Raw document mirror: every field optional so presence can be checked
/// explicitly rather than defaulted away by serde.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTunerConfig {
    instant_repeatables: Option<bool>,
    remove_intel_center_requirement: Option<bool>,

    xp_multiplier: Option<f64>,
    currency_multiplier: Option<f64>,
    rep_multiplier: Option<f64>,
    skill_reward_chance_multiplier: Option<f64>,
    skill_point_reward_multiplier: Option<f64>,

    daily_min_player_level: Option<u32>,
    daily_number_of_quests: Option<u32>,
    daily_reset_timer: Option<i64>,

    weekly_min_player_level: Option<u32>,
    weekly_number_of_quests: Option<u32>,
    weekly_reset_timer: Option<i64>,

    special_min_player_level: Option<u32>,
    special_number_of_quests: Option<u32>,
    special_reset_timer: Option<i64>,
}

/// The validated tuning configuration.
///
/// Immutable after load and owned for the process lifetime.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct TunerConfig {
    /// Replace completed repeatables instantly instead of waiting for the
    /// category reset.
    pub instant_repeatables: bool,
    /// Bypass the special-repeatables unlock prerequisite.
    pub remove_intel_center_requirement: bool,

    /// Experience reward multiplier.
    #[validate(range(min = 0.0))]
    pub xp_multiplier: f64,
    /// Currency reward multiplier (standard and premium).
    #[validate(range(min = 0.0))]
    pub currency_multiplier: f64,
    /// Vendor reputation reward multiplier.
    #[validate(range(min = 0.0))]
    pub rep_multiplier: f64,
    /// Skill reward chance multiplier.
    #[validate(range(min = 0.0))]
    pub skill_reward_chance_multiplier: f64,
    /// Skill point reward multiplier.
    #[validate(range(min = 0.0))]
    pub skill_point_reward_multiplier: f64,

    /// Minimum player level for daily quests.
    pub daily_min_player_level: u32,
    /// Daily quests offered per cycle.
    pub daily_number_of_quests: u32,
    /// Seconds between daily resets.
    pub daily_reset_timer: i64,

    /// Minimum player level for weekly quests.
    pub weekly_min_player_level: u32,
    /// Weekly quests offered per cycle.
    pub weekly_number_of_quests: u32,
    /// Seconds between weekly resets.
    pub weekly_reset_timer: i64,

    /// Minimum player level for special quests.
    pub special_min_player_level: u32,
    /// Special quests offered per cycle.
    pub special_number_of_quests: u32,
    /// Seconds between special resets.
    pub special_reset_timer: i64,
}

fn require<T>(value: Option<T>, name: &'static str) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::MissingOption(name))
}

impl TunerConfig {
    /// Loads and validates the tuning document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io(e)
            }
        })?;

        Self::from_json(&contents)
    }

    /// Parses and validates a tuning document from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawTunerConfig = serde_json::from_str(contents).map_err(ConfigError::Parse)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawTunerConfig) -> Result<Self, ConfigError> {
        let config = Self {
            instant_repeatables: require(raw.instant_repeatables, "InstantRepeatables")?,
            remove_intel_center_requirement: require(
                raw.remove_intel_center_requirement,
                "RemoveIntelCenterRequirement",
            )?,
            xp_multiplier: require(raw.xp_multiplier, "XpMultiplier")?,
            currency_multiplier: require(raw.currency_multiplier, "CurrencyMultiplier")?,
            rep_multiplier: require(raw.rep_multiplier, "RepMultiplier")?,
            skill_reward_chance_multiplier: require(
                raw.skill_reward_chance_multiplier,
                "SkillRewardChanceMultiplier",
            )?,
            skill_point_reward_multiplier: require(
                raw.skill_point_reward_multiplier,
                "SkillPointRewardMultiplier",
            )?,
            daily_min_player_level: require(raw.daily_min_player_level, "DailyMinPlayerLevel")?,
            daily_number_of_quests: require(raw.daily_number_of_quests, "DailyNumberOfQuests")?,
            daily_reset_timer: require(raw.daily_reset_timer, "DailyResetTimer")?,
            weekly_min_player_level: require(raw.weekly_min_player_level, "WeeklyMinPlayerLevel")?,
            weekly_number_of_quests: require(raw.weekly_number_of_quests, "WeeklyNumberOfQuests")?,
            weekly_reset_timer: require(raw.weekly_reset_timer, "WeeklyResetTimer")?,
            special_min_player_level: require(
                raw.special_min_player_level,
                "SpecialMinPlayerLevel",
            )?,
            special_number_of_quests: require(
                raw.special_number_of_quests,
                "SpecialNumberOfQuests",
            )?,
            special_reset_timer: require(raw.special_reset_timer, "SpecialResetTimer")?,
        };

        config.validate().map_err(|errs| {
            let field = errs
                .field_errors()
                .keys()
                .next()
                .map(|k| k.to_string())
                .unwrap_or_default();
            ConfigError::InvalidOption { field }
        })?;

        Ok(config)
    }

    /// Minimum player level override for a category.
    pub fn min_player_level(&self, kind: CategoryKind) -> u32 {
        match kind {
            CategoryKind::Daily => self.daily_min_player_level,
            CategoryKind::Weekly => self.weekly_min_player_level,
            CategoryKind::Special => self.special_min_player_level,
        }
    }

    /// Quest count override for a category.
    pub fn num_quests(&self, kind: CategoryKind) -> u32 {
        match kind {
            CategoryKind::Daily => self.daily_number_of_quests,
            CategoryKind::Weekly => self.weekly_number_of_quests,
            CategoryKind::Special => self.special_number_of_quests,
        }
    }

    /// Reset timer override for a category, in seconds.
    pub fn reset_timer_seconds(&self, kind: CategoryKind) -> i64 {
        match kind {
            CategoryKind::Daily => self.daily_reset_timer,
            CategoryKind::Weekly => self.weekly_reset_timer,
            CategoryKind::Special => self.special_reset_timer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    fn full_document() -> serde_json::Value {
        serde_json::json!({
            "InstantRepeatables": true,
            "RemoveIntelCenterRequirement": true,
            "XpMultiplier": 2.0,
            "CurrencyMultiplier": 1.5,
            "RepMultiplier": 1.0,
            "SkillRewardChanceMultiplier": 1.0,
            "SkillPointRewardMultiplier": 1.0,
            "DailyMinPlayerLevel": 5,
            "DailyNumberOfQuests": 6,
            "DailyResetTimer": 86400,
            "WeeklyMinPlayerLevel": 15,
            "WeeklyNumberOfQuests": 3,
            "WeeklyResetTimer": 604800,
            "SpecialMinPlayerLevel": 1,
            "SpecialNumberOfQuests": 5,
            "SpecialResetTimer": 86400
        })
    }

    #[test]
    fn test_load_full_document() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "{}", full_document()).expect("write");

        let config = TunerConfig::load(file.path()).expect("load");
        assert!(config.instant_repeatables);
        assert_eq!(config.xp_multiplier, 2.0);
        assert_eq!(config.num_quests(CategoryKind::Weekly), 3);
        assert_eq!(config.reset_timer_seconds(CategoryKind::Special), 86_400);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = TunerConfig::load("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = TunerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_each_missing_option_is_reported_by_name() {
        let mut doc = full_document();
        doc.as_object_mut()
            .expect("object")
            .remove("CurrencyMultiplier");

        let err = TunerConfig::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingOption("CurrencyMultiplier")
        ));
    }

    #[test]
    fn test_negative_multiplier_is_invalid() {
        let mut doc = full_document();
        doc.as_object_mut()
            .expect("object")
            .insert("XpMultiplier".to_string(), serde_json::json!(-1.0));

        let err = TunerConfig::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { .. }));
    }

    #[test]
    fn test_maps_into_configuration_app_error() {
        let err: AppError = ConfigError::MissingOption("XpMultiplier").into();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("XpMultiplier"));
    }
}
