//! Hook implementations for the repeatable quest plugin.
//!
//! The completion pair communicates exclusively through the intercepted
//! call's hand-off state: the before-hook remembers which category the
//! completed quest came from, the after-hook consumes it. Nothing is
//! shared between calls, so concurrent completions from different
//! sessions cannot observe each other.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use raidhub_core::AppError;
use raidhub_core::config::CategoryKind;
use raidhub_core::types::{QuestId, VendorId};
use raidhub_entity::quest::ChangeRequirement;
use raidhub_entity::response::EventResponse;
use raidhub_plugin::HostContext;
use raidhub_plugin::hooks::definitions::{HookHandler, HookOutcome, InterceptedCall};

/// Plugin identifier shared by every handler in this crate.
pub const PLUGIN_ID: &str = "repeatable-quest-tuner";

/// Argument name the host uses for the completed quest id.
pub const QUEST_ID_ARG: &str = "quest_id";

/// Hand-off state key carrying the completed quest's category.
const COMPLETED_CATEGORY_KEY: &str = "completed_category";

/// Before-hook on quest completion: remember which repeatable category the
/// completed quest belongs to, if any.
#[derive(Debug)]
pub struct QuestCompleteBeforeHook {
    host: HostContext,
}

impl QuestCompleteBeforeHook {
    /// Creates the before-hook.
    pub fn new(host: HostContext) -> Self {
        Self { host }
    }
}

#[async_trait]
impl HookHandler for QuestCompleteBeforeHook {
    fn name(&self) -> &str {
        "repeatable_quest_complete_before"
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }

    async fn handle(&self, call: &InterceptedCall) -> Result<HookOutcome, AppError> {
        let Some(quest_id) = call.arg_uuid(QUEST_ID_ARG).map(QuestId::from) else {
            warn!(
                session_id = %call.session_id,
                "Quest completion call carries no quest id, ignoring"
            );
            return Ok(HookOutcome::Continue);
        };

        let profile = self.host.profiles.profile(call.session_id).await?;
        let profile = profile.read().await;

        for group in &profile.repeatables {
            if group.active_quest(quest_id).is_some() {
                debug!(
                    session_id = %call.session_id,
                    quest_id = %quest_id,
                    category = %group.kind,
                    "Completion matches an active repeatable"
                );
                let mut mods = HashMap::new();
                mods.insert(
                    COMPLETED_CATEGORY_KEY.to_string(),
                    serde_json::json!(group.kind),
                );
                return Ok(HookOutcome::ContinueWith(mods));
            }
        }

        Ok(HookOutcome::Continue)
    }
}

/// After-hook on quest completion: generate a replacement quest for the
/// remembered category and splice the refreshed group into the response.
///
/// First replaceable match wins: once a replacement is confirmed the
/// handler returns immediately and later groups go unexamined this cycle.
#[derive(Debug)]
pub struct QuestCompleteAfterHook {
    host: HostContext,
}

impl QuestCompleteAfterHook {
    /// Creates the after-hook.
    pub fn new(host: HostContext) -> Self {
        Self { host }
    }
}

#[async_trait]
impl HookHandler for QuestCompleteAfterHook {
    fn name(&self) -> &str {
        "repeatable_quest_complete_after"
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }

    async fn handle(&self, call: &InterceptedCall) -> Result<HookOutcome, AppError> {
        let Some(kind) = call.state(COMPLETED_CATEGORY_KEY) else {
            return Ok(HookOutcome::Continue);
        };
        let kind: CategoryKind = serde_json::from_value(kind.clone())?;

        let profile_handle = self.host.profiles.profile(call.session_id).await?;
        let mut profile = profile_handle.write().await;
        let player_level = profile.level;
        let quest_config = self.host.quest_config.read().await;

        let mut refreshed = Vec::new();
        for group in profile.repeatables.iter_mut() {
            if group.kind != kind {
                continue;
            }

            let Some(category_cfg) = quest_config.category(kind) else {
                warn!(
                    category = %kind,
                    "No configuration block for completed category, skipping"
                );
                continue;
            };

            let generated = self
                .host
                .quest_generator
                .generate(category_cfg, call.session_id, player_level)
                .await?;

            let Some(mut replacement) = generated else {
                debug!(
                    session_id = %call.session_id,
                    category = %kind,
                    "Host generated no replacement, leaving the response untouched"
                );
                continue;
            };

            replacement.side = Some(category_cfg.side.clone());
            group.change_requirements.insert(
                replacement.id,
                ChangeRequirement {
                    change_cost: replacement.change_cost.clone(),
                    change_standing_cost: replacement.change_standing_cost.unwrap_or(0.0),
                },
            );
            group.active_quests.push(replacement);
            refreshed.push(group.clone());

            let mut response: EventResponse = match call.result() {
                Some(value) => serde_json::from_value(value.clone())?,
                None => EventResponse::default(),
            };
            response
                .profile_changes
                .entry(call.session_id)
                .or_default()
                .repeatable_quests = Some(refreshed);

            info!(
                session_id = %call.session_id,
                category = %kind,
                "Replaced completed repeatable with a freshly generated quest"
            );
            return Ok(HookOutcome::ReplaceResult(serde_json::to_value(response)?));
        }

        Ok(HookOutcome::Continue)
    }
}

/// Before-hook on the special-repeatables unlock gate.
///
/// The gate normally requires an upgraded facility; this hook forces it
/// open unless the prerequisite vendor is explicitly locked, in which case
/// the host's own check runs unchanged. Stateless.
#[derive(Debug)]
pub struct UnlockGateHook {
    host: HostContext,
    prerequisite_vendor: VendorId,
}

impl UnlockGateHook {
    /// Creates the gate hook for a prerequisite vendor.
    pub fn new(host: HostContext, prerequisite_vendor: VendorId) -> Self {
        Self {
            host,
            prerequisite_vendor,
        }
    }
}

#[async_trait]
impl HookHandler for UnlockGateHook {
    fn name(&self) -> &str {
        "repeatable_unlock_gate"
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }

    async fn handle(&self, call: &InterceptedCall) -> Result<HookOutcome, AppError> {
        let profile = self.host.profiles.profile(call.session_id).await?;
        let profile = profile.read().await;

        if let Some(vendor) = profile.vendors.get(&self.prerequisite_vendor) {
            if vendor.unlocked == Some(false) {
                debug!(
                    session_id = %call.session_id,
                    vendor_id = %self.prerequisite_vendor,
                    "Prerequisite vendor is locked, deferring to the default check"
                );
                return Ok(HookOutcome::Continue);
            }
        }

        debug!(
            session_id = %call.session_id,
            "Forcing special repeatables unlocked"
        );
        Ok(HookOutcome::ShortCircuit(Value::Bool(true)))
    }
}
