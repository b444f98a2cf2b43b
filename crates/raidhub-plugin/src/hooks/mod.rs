//! Hook system — registry, dispatcher, and typed interception definitions.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{CallPhase, HookHandler, HookOutcome, HookPhase, InterceptedCall, Operation};
pub use dispatcher::{FailurePolicy, HookDispatcher};
pub use registry::HookRegistry;
