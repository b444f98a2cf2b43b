//! Shared fixtures for the repeatable quest plugin integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use tokio::sync::RwLock;

use plugin_repeatable_quests::config::TunerConfig;
use plugin_repeatable_quests::mock::{InMemoryProfileService, MockQuestGenerator};
use raidhub_core::config::{
    CategoryKind, RepeatableCategoryConfig, RepeatableQuestsConfig, RewardScaling,
};
use raidhub_core::types::QuestId;
use raidhub_entity::profile::PlayerProfile;
use raidhub_entity::quest::{RepeatableQuest, RepeatableQuestGroup};
use raidhub_plugin::HostContext;

/// Mock host wiring: the services behind a [`HostContext`] plus direct
/// handles for assertions.
pub struct TestHost {
    /// The mock quest generator.
    pub generator: Arc<MockQuestGenerator>,
    /// The in-memory profile store.
    pub profiles: Arc<InMemoryProfileService>,
    /// The shared quest configuration.
    pub quest_config: Arc<RwLock<RepeatableQuestsConfig>>,
    /// The context handed to plugins.
    pub ctx: HostContext,
}

/// Builds a mock host with the three stock category blocks.
pub fn test_host() -> TestHost {
    let generator = Arc::new(MockQuestGenerator::new());
    let profiles = Arc::new(InMemoryProfileService::new());
    let quest_config = Arc::new(RwLock::new(quest_config()));
    let ctx = HostContext::new(
        generator.clone(),
        profiles.clone(),
        quest_config.clone(),
    );

    TestHost {
        generator,
        profiles,
        quest_config,
        ctx,
    }
}

/// A fully populated tuning document with the given toggles.
pub fn tuning(instant_repeatables: bool, remove_unlock_requirement: bool) -> TunerConfig {
    TunerConfig {
        instant_repeatables,
        remove_intel_center_requirement: remove_unlock_requirement,
        xp_multiplier: 2.0,
        currency_multiplier: 1.5,
        rep_multiplier: 1.0,
        skill_reward_chance_multiplier: 1.0,
        skill_point_reward_multiplier: 1.0,
        daily_min_player_level: 5,
        daily_number_of_quests: 6,
        daily_reset_timer: 86_400,
        weekly_min_player_level: 15,
        weekly_number_of_quests: 3,
        weekly_reset_timer: 604_800,
        special_min_player_level: 1,
        special_number_of_quests: 5,
        special_reset_timer: 86_400,
    }
}

fn category(kind: CategoryKind, side: &str) -> RepeatableCategoryConfig {
    RepeatableCategoryConfig {
        kind,
        side: side.to_string(),
        min_player_level: 5,
        num_quests: 3,
        reset_time_seconds: 86_400,
        reward_scaling: RewardScaling {
            levels: vec![1.0, 20.0],
            experience: vec![100.0, 200.0],
            currency: vec![10.0, 20.0],
            premium_currency: vec![1.0, 2.0],
            reputation: vec![0.02, 0.04],
            skill_reward_chance: vec![0.25, 0.5],
            skill_point_reward: vec![2.0, 4.0],
        },
    }
}

/// Quest configuration with one block per stock category.
pub fn quest_config() -> RepeatableQuestsConfig {
    RepeatableQuestsConfig {
        categories: vec![
            category(CategoryKind::Daily, "scout"),
            category(CategoryKind::Weekly, "scout"),
            category(CategoryKind::Special, "raider"),
        ],
    }
}

/// A minimal repeatable quest with a fresh id.
pub fn quest(name: &str) -> RepeatableQuest {
    RepeatableQuest {
        id: QuestId::new(),
        name: name.to_string(),
        side: None,
        change_cost: Vec::new(),
        change_standing_cost: Some(0.05),
    }
}

/// A quest group of the given category holding `quests`.
pub fn group_with(kind: CategoryKind, quests: Vec<RepeatableQuest>) -> RepeatableQuestGroup {
    let mut group = RepeatableQuestGroup::new(kind);
    group.active_quests = quests;
    group
}

/// A profile at `level` carrying the given quest groups.
pub fn profile_with_groups(level: u32, groups: Vec<RepeatableQuestGroup>) -> PlayerProfile {
    let mut profile = PlayerProfile::new("tester", level);
    profile.repeatables = groups;
    profile
}
