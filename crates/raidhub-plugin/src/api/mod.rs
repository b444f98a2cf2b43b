//! Plugin API — the host context and capability traits exposed to plugins.

pub mod context;

pub use context::{HostContext, ProfileService, QuestGeneratorService};
