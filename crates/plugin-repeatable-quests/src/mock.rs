//! In-memory mock host services for development and testing.
//!
//! Simulates the host capabilities the plugin consumes without requiring a
//! running RaidHub server: a quest generator with canned per-category
//! replacements and a profile store.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;

use raidhub_core::config::{CategoryKind, RepeatableCategoryConfig};
use raidhub_core::types::SessionId;
use raidhub_core::{AppError, AppResult};
use raidhub_entity::profile::PlayerProfile;
use raidhub_entity::quest::RepeatableQuest;
use raidhub_plugin::api::context::{ProfileService, QuestGeneratorService};

/// Mock quest generator with canned per-category replacement queues.
///
/// `generate` pops the next canned quest for the requested category and
/// records the call; an exhausted queue yields `None`, simulating a host
/// that could not roll a quest.
#[derive(Debug, Default)]
pub struct MockQuestGenerator {
    /// Canned replacements per category.
    queues: Mutex<HashMap<CategoryKind, VecDeque<RepeatableQuest>>>,
    /// Every (category, session) pair `generate` was called with.
    calls: Mutex<Vec<(CategoryKind, SessionId)>>,
}

impl MockQuestGenerator {
    /// Creates a generator with no canned quests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a canned replacement for a category.
    pub fn push(&self, kind: CategoryKind, quest: RepeatableQuest) {
        let mut queues = self.queues.lock().unwrap_or_else(|e| e.into_inner());
        queues.entry(kind).or_default().push_back(quest);
    }

    /// Returns every call made so far.
    pub fn calls(&self) -> Vec<(CategoryKind, SessionId)> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl QuestGeneratorService for MockQuestGenerator {
    async fn generate(
        &self,
        category: &RepeatableCategoryConfig,
        session_id: SessionId,
        _player_level: u32,
    ) -> AppResult<Option<RepeatableQuest>> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((category.kind, session_id));

        let mut queues = self.queues.lock().unwrap_or_else(|e| e.into_inner());
        Ok(queues
            .get_mut(&category.kind)
            .and_then(|queue| queue.pop_front()))
    }
}

/// In-memory profile store keyed by session.
#[derive(Debug, Default)]
pub struct InMemoryProfileService {
    profiles: DashMap<SessionId, Arc<RwLock<PlayerProfile>>>,
}

impl InMemoryProfileService {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a profile for a session and returns its shared handle.
    pub fn insert(
        &self,
        session_id: SessionId,
        profile: PlayerProfile,
    ) -> Arc<RwLock<PlayerProfile>> {
        let handle = Arc::new(RwLock::new(profile));
        self.profiles.insert(session_id, handle.clone());
        handle
    }
}

#[async_trait]
impl ProfileService for InMemoryProfileService {
    async fn profile(&self, session_id: SessionId) -> AppResult<Arc<RwLock<PlayerProfile>>> {
        self.profiles
            .get(&session_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::session(format!("No profile for session {session_id}")))
    }
}
