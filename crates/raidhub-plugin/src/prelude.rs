//! Prelude for convenient imports.

pub use async_trait::async_trait;

pub use crate::api::context::{HostContext, ProfileService, QuestGeneratorService};
pub use crate::error::InterceptionError;
pub use crate::hooks::definitions::{
    CallPhase, HookHandler, HookOutcome, HookPhase, InterceptedCall, Operation,
};
pub use crate::hooks::dispatcher::{FailurePolicy, HookDispatcher};
pub use crate::hooks::registry::HookRegistry;
pub use crate::manager::PluginManager;
pub use crate::registry::{HookBinding, Plugin, PluginInfo, PluginRegistry};
pub use crate::traits::ClosureHandler;
