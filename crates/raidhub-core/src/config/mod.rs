//! Host configuration schemas.
//!
//! These structs mirror the in-memory configuration objects owned by the
//! RaidHub server process. Plugins receive shared handles to them at load
//! time; they are write-once at startup and read-many afterwards.

pub mod quests;

pub use quests::{CategoryKind, RepeatableCategoryConfig, RepeatableQuestsConfig, RewardScaling};
