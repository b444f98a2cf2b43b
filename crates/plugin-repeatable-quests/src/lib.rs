//! # plugin-repeatable-quests
//!
//! Repeatable quest tuner plugin for the RaidHub server:
//!
//! - Scales the host's repeatable-quest reward tables and per-category
//!   thresholds from a JSON tuning document, exactly once at load
//! - Instantly replaces a completed repeatable quest with a freshly
//!   generated one, in place, inside the completion response
//! - Optionally overrides the special-repeatables unlock gate so the
//!   category is available without its usual prerequisite

pub mod config;
pub mod hooks;
pub mod mock;
pub mod plugin;
pub mod scaling;

pub use config::{ConfigError, TunerConfig};
pub use plugin::RepeatableQuestTunerPlugin;
