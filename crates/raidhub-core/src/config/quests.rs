//! Repeatable quest configuration owned by the host server.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The named grouping a repeatable quest belongs to.
///
/// Each category shares one configuration block and one reset cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Quests refreshed once per day.
    Daily,
    /// Quests refreshed once per week.
    Weekly,
    /// Special vendor quests gated behind an unlock check.
    Special,
}

impl CategoryKind {
    /// Returns the string name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Special => "special",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-level reward scaling tables for one quest category.
///
/// Each sequence is indexed by the level bracket in `levels`; the host
/// interpolates between brackets when rolling rewards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewardScaling {
    /// Player level brackets the other sequences are indexed by.
    #[serde(default)]
    pub levels: Vec<f64>,
    /// Experience rewarded per bracket.
    #[serde(default)]
    pub experience: Vec<f64>,
    /// Standard currency rewarded per bracket.
    #[serde(default)]
    pub currency: Vec<f64>,
    /// Premium currency rewarded per bracket.
    #[serde(default)]
    pub premium_currency: Vec<f64>,
    /// Vendor reputation rewarded per bracket.
    #[serde(default)]
    pub reputation: Vec<f64>,
    /// Chance of rolling a skill reward per bracket.
    #[serde(default)]
    pub skill_reward_chance: Vec<f64>,
    /// Skill points granted when a skill reward rolls.
    #[serde(default)]
    pub skill_point_reward: Vec<f64>,
}

/// Configuration block for one repeatable quest category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatableCategoryConfig {
    /// Which category this block configures.
    pub kind: CategoryKind,
    /// Faction side newly generated quests are stamped with.
    pub side: String,
    /// Minimum player level before this category is offered.
    pub min_player_level: u32,
    /// How many quests the category offers per cycle.
    pub num_quests: u32,
    /// Seconds between category resets.
    pub reset_time_seconds: i64,
    /// Reward scaling tables.
    pub reward_scaling: RewardScaling,
}

/// The host's shared repeatable quest configuration.
///
/// One block per category. The host hands plugins a shared handle to this
/// object; it must not be mutated after startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepeatableQuestsConfig {
    /// Per-category configuration blocks.
    pub categories: Vec<RepeatableCategoryConfig>,
}

impl RepeatableQuestsConfig {
    /// Returns the configuration block for a category, if present.
    pub fn category(&self, kind: CategoryKind) -> Option<&RepeatableCategoryConfig> {
        self.categories.iter().find(|c| c.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RepeatableQuestsConfig {
        RepeatableQuestsConfig {
            categories: vec![RepeatableCategoryConfig {
                kind: CategoryKind::Daily,
                side: "scout".to_string(),
                min_player_level: 5,
                num_quests: 3,
                reset_time_seconds: 86_400,
                reward_scaling: RewardScaling {
                    levels: vec![1.0, 20.0, 45.0],
                    experience: vec![100.0, 2_000.0, 10_000.0],
                    ..Default::default()
                },
            }],
        }
    }

    #[test]
    fn test_category_lookup() {
        let config = sample();
        assert!(config.category(CategoryKind::Daily).is_some());
        assert!(config.category(CategoryKind::Weekly).is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = sample();
        let json = serde_json::to_string(&config).expect("serialize");
        let parsed: RepeatableQuestsConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.categories.len(), 1);
        assert_eq!(parsed.categories[0].kind, CategoryKind::Daily);
        assert_eq!(parsed.categories[0].reward_scaling.experience.len(), 3);
    }

    #[test]
    fn test_category_kind_as_str() {
        assert_eq!(CategoryKind::Special.as_str(), "special");
        assert_eq!(CategoryKind::Daily.to_string(), "daily");
    }
}
