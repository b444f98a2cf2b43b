//! Plugin registration for the repeatable quest tuner.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use raidhub_core::AppResult;
use raidhub_core::types::VendorId;
use raidhub_plugin::hooks::definitions::{HookPhase, Operation};
use raidhub_plugin::registry::{HookBinding, Plugin, PluginInfo};
use raidhub_plugin::HostContext;

use crate::config::{ConfigError, TunerConfig};
use crate::hooks::{PLUGIN_ID, QuestCompleteAfterHook, QuestCompleteBeforeHook, UnlockGateHook};
use crate::scaling::RewardScaler;

/// The repeatable quest tuner plugin.
///
/// Construction requires a fully validated [`TunerConfig`]; a broken or
/// incomplete document therefore fails before any hook can be installed.
#[derive(Debug)]
pub struct RepeatableQuestTunerPlugin {
    /// Validated tuning document.
    config: TunerConfig,
    /// One-shot scaler for the shared quest configuration.
    scaler: RewardScaler,
    /// Vendor whose locked state defers the unlock gate to the host.
    prerequisite_vendor: VendorId,
}

impl RepeatableQuestTunerPlugin {
    /// Creates the plugin from an already validated configuration.
    pub fn new(config: TunerConfig, prerequisite_vendor: VendorId) -> Self {
        Self {
            config,
            scaler: RewardScaler::new(),
            prerequisite_vendor,
        }
    }

    /// Loads the tuning document at `path` and creates the plugin.
    pub fn from_file(
        path: impl AsRef<Path>,
        prerequisite_vendor: VendorId,
    ) -> Result<Self, ConfigError> {
        let config = TunerConfig::load(path)?;
        Ok(Self::new(config, prerequisite_vendor))
    }

    /// The loaded tuning document.
    pub fn config(&self) -> &TunerConfig {
        &self.config
    }

    fn hooked_operations(&self) -> Vec<String> {
        let mut hooks = Vec::new();
        if self.config.instant_repeatables {
            hooks.push(Operation::QuestComplete.as_str().to_string());
        }
        if self.config.remove_intel_center_requirement {
            hooks.push(Operation::RepeatableUnlockCheck.as_str().to_string());
        }
        hooks
    }
}

#[async_trait]
impl Plugin for RepeatableQuestTunerPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: PLUGIN_ID.to_string(),
            name: "Repeatable Quest Tuner".to_string(),
            version: "1.0.0".to_string(),
            description: "Scales repeatable quest rewards and replaces completed repeatables instantly".to_string(),
            author: "RaidHub Team".to_string(),
            hooks: self.hooked_operations(),
            priority: 100,
        }
    }

    async fn on_load(&self, ctx: &HostContext) -> AppResult<()> {
        let mut quest_config = ctx.quest_config.write().await;
        self.scaler.apply(&self.config, &mut quest_config)?;

        info!(
            categories = quest_config.categories.len(),
            instant_repeatables = self.config.instant_repeatables,
            remove_unlock_requirement = self.config.remove_intel_center_requirement,
            "Repeatable quest tuning applied"
        );
        Ok(())
    }

    async fn on_start(&self) -> AppResult<()> {
        info!(plugin_id = PLUGIN_ID, "Repeatable quest tuner started");
        Ok(())
    }

    async fn on_stop(&self) -> AppResult<()> {
        info!(plugin_id = PLUGIN_ID, "Repeatable quest tuner stopped");
        Ok(())
    }

    fn hook_bindings(&self, ctx: &HostContext) -> Vec<HookBinding> {
        let mut bindings: Vec<HookBinding> = Vec::new();

        if self.config.instant_repeatables {
            bindings.push((
                Operation::QuestComplete,
                HookPhase::Before,
                Arc::new(QuestCompleteBeforeHook::new(ctx.clone())),
            ));
            bindings.push((
                Operation::QuestComplete,
                HookPhase::After,
                Arc::new(QuestCompleteAfterHook::new(ctx.clone())),
            ));
        }

        if self.config.remove_intel_center_requirement {
            bindings.push((
                Operation::RepeatableUnlockCheck,
                HookPhase::Before,
                Arc::new(UnlockGateHook::new(ctx.clone(), self.prerequisite_vendor)),
            ));
        }

        bindings
    }
}
