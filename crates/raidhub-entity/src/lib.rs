//! # raidhub-entity
//!
//! Domain entity models for RaidHub plugins. Every struct in this crate
//! mirrors an in-memory object owned by the host server process. All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`;
//! `Clone` doubles as the host's deep-copy capability so mutated
//! collections never alias the host's live state.

pub mod profile;
pub mod quest;
pub mod response;

pub use profile::{PlayerProfile, VendorStatus};
pub use quest::{ChangeCostItem, ChangeRequirement, RepeatableQuest, RepeatableQuestGroup};
pub use response::{EventResponse, ProfileChange};
