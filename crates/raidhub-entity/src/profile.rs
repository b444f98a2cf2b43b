//! Player profile entity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use raidhub_core::config::CategoryKind;
use raidhub_core::types::VendorId;

use crate::quest::RepeatableQuestGroup;

/// Per-profile status of one vendor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorStatus {
    /// Whether the player has unlocked this vendor. `None` means the host
    /// has not recorded a state yet, which counts as unlocked.
    pub unlocked: Option<bool>,
    /// Current standing with the vendor.
    pub standing: f64,
}

/// The host's in-memory player profile.
///
/// The plugin only reads and rewrites the repeatable-quest and vendor
/// sections; everything else the host tracks stays host-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Player nickname.
    pub nickname: String,
    /// Current player level.
    pub level: u32,
    /// One quest group per repeatable category the player has reached.
    pub repeatables: Vec<RepeatableQuestGroup>,
    /// Vendor statuses keyed by vendor id.
    pub vendors: HashMap<VendorId, VendorStatus>,
}

impl PlayerProfile {
    /// Creates a minimal profile with empty quest groups for each category.
    pub fn new(nickname: impl Into<String>, level: u32) -> Self {
        Self {
            nickname: nickname.into(),
            level,
            repeatables: Vec::new(),
            vendors: HashMap::new(),
        }
    }

    /// Returns the quest group for a category, if the player has one.
    pub fn group(&self, kind: CategoryKind) -> Option<&RepeatableQuestGroup> {
        self.repeatables.iter().find(|g| g.kind == kind)
    }

    /// Returns a mutable quest group for a category, if the player has one.
    pub fn group_mut(&mut self, kind: CategoryKind) -> Option<&mut RepeatableQuestGroup> {
        self.repeatables.iter_mut().find(|g| g.kind == kind)
    }
}
