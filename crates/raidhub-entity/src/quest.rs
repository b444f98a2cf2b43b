//! Repeatable quest entities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use raidhub_core::config::CategoryKind;
use raidhub_core::types::QuestId;

/// A single item stake required to reroll a quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeCostItem {
    /// Item template being charged.
    pub template_id: Uuid,
    /// How many of the item are charged.
    pub count: u32,
}

/// The cost of rerolling one quest, recorded per quest id on its group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequirement {
    /// Item costs charged on reroll.
    pub change_cost: Vec<ChangeCostItem>,
    /// Vendor standing deducted on reroll.
    pub change_standing_cost: f64,
}

/// One generated repeatable quest held by a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatableQuest {
    /// Unique quest instance identifier.
    pub id: QuestId,
    /// Template name of the generated quest.
    pub name: String,
    /// Faction side the quest was generated for. Stamped from the
    /// category configuration when the quest enters a group.
    pub side: Option<String>,
    /// Item costs charged if the player rerolls this quest.
    pub change_cost: Vec<ChangeCostItem>,
    /// Vendor standing deducted if the player rerolls this quest.
    pub change_standing_cost: Option<f64>,
}

/// A player's quest pool for one repeatable category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatableQuestGroup {
    /// Which category this group belongs to.
    pub kind: CategoryKind,
    /// Quests currently offered or in progress.
    pub active_quests: Vec<RepeatableQuest>,
    /// Reroll costs keyed by quest id.
    pub change_requirements: HashMap<QuestId, ChangeRequirement>,
}

impl RepeatableQuestGroup {
    /// Creates an empty group for a category.
    pub fn new(kind: CategoryKind) -> Self {
        Self {
            kind,
            active_quests: Vec::new(),
            change_requirements: HashMap::new(),
        }
    }

    /// Returns the active quest with the given id, if present.
    pub fn active_quest(&self, id: QuestId) -> Option<&RepeatableQuest> {
        self.active_quests.iter().find(|q| q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_quest_lookup() {
        let quest = RepeatableQuest {
            id: QuestId::new(),
            name: "Supply Run".to_string(),
            side: None,
            change_cost: Vec::new(),
            change_standing_cost: None,
        };
        let id = quest.id;

        let mut group = RepeatableQuestGroup::new(CategoryKind::Daily);
        group.active_quests.push(quest);

        assert!(group.active_quest(id).is_some());
        assert!(group.active_quest(QuestId::new()).is_none());
    }

    #[test]
    fn test_clone_does_not_alias() {
        let mut group = RepeatableQuestGroup::new(CategoryKind::Weekly);
        group.active_quests.push(RepeatableQuest {
            id: QuestId::new(),
            name: "Long Haul".to_string(),
            side: Some("scout".to_string()),
            change_cost: vec![ChangeCostItem {
                template_id: Uuid::new_v4(),
                count: 2,
            }],
            change_standing_cost: Some(0.01),
        });

        let snapshot = group.clone();
        group.active_quests.clear();

        assert_eq!(snapshot.active_quests.len(), 1);
    }
}
