//! Host context — capabilities the host injects into plugins at startup.
//!
//! Plugins never reach into host internals by name; everything they may
//! call is a typed capability handed over here. Deep-copying host records
//! needs no capability of its own: entity types derive `Clone`, and a
//! clone never aliases the host's live state.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use raidhub_core::AppResult;
use raidhub_core::config::{RepeatableCategoryConfig, RepeatableQuestsConfig};
use raidhub_core::types::SessionId;
use raidhub_entity::profile::PlayerProfile;
use raidhub_entity::quest::RepeatableQuest;

/// The host's quest generation routine, treated as opaque.
///
/// Returning `Ok(None)` means the host could not roll a quest for the
/// category (exhausted pool, level gate) — callers leave state untouched.
#[async_trait]
pub trait QuestGeneratorService: Send + Sync {
    /// Attempts to generate one repeatable quest for a category.
    async fn generate(
        &self,
        category: &RepeatableCategoryConfig,
        session_id: SessionId,
        player_level: u32,
    ) -> AppResult<Option<RepeatableQuest>>;
}

/// Access to the host's in-memory player profiles.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Returns the shared profile handle for a session.
    async fn profile(&self, session_id: SessionId) -> AppResult<Arc<RwLock<PlayerProfile>>>;
}

/// Context passed to plugins providing access to host capabilities.
///
/// Injected once at startup; every field is shared with the host.
#[derive(Clone)]
pub struct HostContext {
    /// The host's quest generation routine.
    pub quest_generator: Arc<dyn QuestGeneratorService>,
    /// Player profile access.
    pub profiles: Arc<dyn ProfileService>,
    /// The host's shared repeatable quest configuration. Written once at
    /// startup (configuration plugins scale it during load), read-many
    /// afterwards.
    pub quest_config: Arc<RwLock<RepeatableQuestsConfig>>,
}

impl HostContext {
    /// Creates a new host context.
    pub fn new(
        quest_generator: Arc<dyn QuestGeneratorService>,
        profiles: Arc<dyn ProfileService>,
        quest_config: Arc<RwLock<RepeatableQuestsConfig>>,
    ) -> Self {
        Self {
            quest_generator,
            profiles,
            quest_config,
        }
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext").finish()
    }
}
