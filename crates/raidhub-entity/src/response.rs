//! Event response entities.
//!
//! The host answers client item events (quest completion among them) with
//! an [`EventResponse`] describing every profile change the event caused.
//! Interceptors rewrite this object rather than the live profile state the
//! host already persisted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use raidhub_core::types::SessionId;

use crate::quest::RepeatableQuestGroup;

/// Profile changes produced for one session by one event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileChange {
    /// Experience granted by the event.
    #[serde(default)]
    pub experience: u64,
    /// Refreshed repeatable quest groups, when the event touched them.
    /// `None` means the client keeps its current view.
    #[serde(default)]
    pub repeatable_quests: Option<Vec<RepeatableQuestGroup>>,
}

/// The host's response to a client item event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventResponse {
    /// Changes keyed by the session they apply to.
    pub profile_changes: HashMap<SessionId, ProfileChange>,
}

impl EventResponse {
    /// Creates a response carrying an empty change set for one session.
    pub fn for_session(session_id: SessionId) -> Self {
        let mut profile_changes = HashMap::new();
        profile_changes.insert(session_id, ProfileChange::default());
        Self { profile_changes }
    }

    /// Returns the change set for a session, if present.
    pub fn changes(&self, session_id: SessionId) -> Option<&ProfileChange> {
        self.profile_changes.get(&session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_session_seeds_empty_changes() {
        let session_id = SessionId::new();
        let response = EventResponse::for_session(session_id);

        let changes = response.changes(session_id).expect("changes present");
        assert!(changes.repeatable_quests.is_none());
        assert_eq!(changes.experience, 0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let session_id = SessionId::new();
        let response = EventResponse::for_session(session_id);

        let json = serde_json::to_value(&response).expect("serialize");
        let parsed: EventResponse = serde_json::from_value(json).expect("deserialize");
        assert!(parsed.changes(session_id).is_some());
    }
}
