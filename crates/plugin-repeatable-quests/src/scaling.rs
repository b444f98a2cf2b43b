//! Applies the tuning document to the host's shared quest configuration.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use raidhub_core::config::RepeatableQuestsConfig;
use raidhub_core::{AppError, AppResult};

use crate::config::TunerConfig;

/// Multiplies every element of a reward sequence by `factor`, in place.
///
/// The sequence keeps its length; element `i` becomes `original[i] * factor`.
pub fn scale_in_place(values: &mut [f64], factor: f64) {
    for value in values.iter_mut() {
        *value *= factor;
    }
}

/// One-shot application of a [`TunerConfig`] to the host configuration.
///
/// Repeated application compounds the multipliers, so the scaler carries a
/// process-lifetime guard: the second `apply` call fails with a conflict
/// and leaves the configuration untouched.
#[derive(Debug, Default)]
pub struct RewardScaler {
    applied: AtomicBool,
}

impl RewardScaler {
    /// Creates an unapplied scaler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scaler has already run.
    pub fn is_applied(&self) -> bool {
        self.applied.load(Ordering::SeqCst)
    }

    /// Scales every category's reward tables and overrides its level
    /// threshold, quest count, and reset timer from the tuning document.
    pub fn apply(
        &self,
        tuning: &TunerConfig,
        quest_config: &mut RepeatableQuestsConfig,
    ) -> AppResult<()> {
        if self.applied.swap(true, Ordering::SeqCst) {
            return Err(AppError::conflict(
                "repeatable quest tuning has already been applied",
            ));
        }

        for category in quest_config.categories.iter_mut() {
            let scaling = &mut category.reward_scaling;
            scale_in_place(&mut scaling.experience, tuning.xp_multiplier);
            scale_in_place(&mut scaling.currency, tuning.currency_multiplier);
            scale_in_place(&mut scaling.premium_currency, tuning.currency_multiplier);
            scale_in_place(&mut scaling.reputation, tuning.rep_multiplier);
            scale_in_place(
                &mut scaling.skill_reward_chance,
                tuning.skill_reward_chance_multiplier,
            );
            scale_in_place(
                &mut scaling.skill_point_reward,
                tuning.skill_point_reward_multiplier,
            );

            category.min_player_level = tuning.min_player_level(category.kind);
            category.num_quests = tuning.num_quests(category.kind);
            category.reset_time_seconds = tuning.reset_timer_seconds(category.kind);

            info!(
                category = %category.kind,
                min_player_level = category.min_player_level,
                num_quests = category.num_quests,
                reset_time_seconds = category.reset_time_seconds,
                "Applied repeatable quest tuning"
            );
        }

        Ok(())
    }
}
