//! Interceptable operation definitions and the per-call record.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use raidhub_core::AppError;
use raidhub_core::types::SessionId;

/// Enumeration of the host operations plugins may intercept.
///
/// This is the extension-point contract: the host dispatches each of these
/// through the hook system and guarantees no other entry point exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A player marks a quest complete. Before-hooks observe the request,
    /// after-hooks observe and may rewrite the event response.
    QuestComplete,
    /// The host asks whether special repeatables are unlocked for a
    /// session. Returns a boolean; before-hooks may short-circuit it.
    RepeatableUnlockCheck,
}

impl Operation {
    /// Every operation the stock host dispatches.
    pub const ALL: [Operation; 2] = [Operation::QuestComplete, Operation::RepeatableUnlockCheck];

    /// Returns the string name of this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuestComplete => "quest_complete",
            Self::RepeatableUnlockCheck => "repeatable_unlock_check",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of the operation a handler runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    /// Runs prior to the default operation and may short-circuit it.
    Before,
    /// Runs after the (possibly short-circuited) operation and may
    /// replace its result.
    After,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// Lifecycle of one intercepted call.
///
/// `Pending → Before → {ShortCircuited | PassThrough} → After → Completed`.
/// The terminal state is always `Completed`; there are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// Created, not yet dispatched.
    Pending,
    /// The before chain is running.
    Before,
    /// A before-hook supplied the result; the default operation is skipped.
    ShortCircuited,
    /// No before-hook intervened; the default operation runs.
    PassThrough,
    /// The after chain is running.
    After,
    /// Dispatch finished.
    Completed,
}

/// Ephemeral record of one intercepted call.
///
/// Exists only for the duration of the call. The `state` map is the only
/// channel between a before-hook and its matching after-hook — it is
/// scoped to this record, so concurrent calls can never observe each
/// other's hand-off values.
#[derive(Debug, Clone)]
pub struct InterceptedCall {
    /// The operation being intercepted.
    pub operation: Operation,
    /// The session the call belongs to.
    pub session_id: SessionId,
    /// Input arguments keyed by name.
    args: HashMap<String, Value>,
    /// Call-scoped hand-off state written by `ContinueWith` outcomes.
    state: HashMap<String, Value>,
    /// The in-progress result, once one exists.
    result: Option<Value>,
    /// Where the call is in its lifecycle.
    phase: CallPhase,
    /// Whether a before-hook short-circuited the default operation.
    short_circuited: bool,
    /// When the call entered the dispatcher.
    pub started_at: DateTime<Utc>,
}

impl InterceptedCall {
    /// Creates a new pending call record.
    pub fn new(operation: Operation, session_id: SessionId) -> Self {
        Self {
            operation,
            session_id,
            args: HashMap::new(),
            state: HashMap::new(),
            result: None,
            phase: CallPhase::Pending,
            short_circuited: false,
            started_at: Utc::now(),
        }
    }

    /// Adds a named argument.
    pub fn with_arg(mut self, key: &str, value: Value) -> Self {
        self.args.insert(key.to_string(), value);
        self
    }

    /// Adds a UUID argument.
    pub fn with_uuid_arg(self, key: &str, value: Uuid) -> Self {
        self.with_arg(key, serde_json::json!(value))
    }

    /// Gets an argument by name.
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Gets a string argument.
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(|v| v.as_str())
    }

    /// Gets a UUID argument.
    pub fn arg_uuid(&self, key: &str) -> Option<Uuid> {
        self.args
            .get(key)
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
    }

    /// Gets a boolean argument.
    pub fn arg_bool(&self, key: &str) -> Option<bool> {
        self.args.get(key).and_then(|v| v.as_bool())
    }

    /// Gets a hand-off state value by key.
    pub fn state(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Gets a string hand-off state value.
    pub fn state_str(&self, key: &str) -> Option<&str> {
        self.state.get(key).and_then(|v| v.as_str())
    }

    /// Merges `ContinueWith` modifications into the hand-off state.
    pub(crate) fn merge_state(&mut self, mods: HashMap<String, Value>) {
        self.state.extend(mods);
    }

    /// The in-progress result, if one exists yet.
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Consumes the call and returns its final result.
    pub fn into_result(self) -> Option<Value> {
        self.result
    }

    pub(crate) fn set_result(&mut self, result: Value) {
        self.result = Some(result);
    }

    /// Where the call is in its lifecycle.
    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: CallPhase) {
        self.phase = phase;
    }

    /// Whether a before-hook short-circuited the default operation.
    pub fn short_circuited(&self) -> bool {
        self.short_circuited
    }

    pub(crate) fn mark_short_circuited(&mut self) {
        self.short_circuited = true;
    }
}

/// Decision returned by a hook handler.
#[derive(Debug, Clone)]
pub enum HookOutcome {
    /// Proceed to the next handler unchanged.
    Continue,
    /// Proceed, merging these values into the call's hand-off state.
    ContinueWith(HashMap<String, Value>),
    /// Skip the default operation and use this result instead.
    /// Only meaningful from a before-hook; ignored with a warning
    /// elsewhere.
    ShortCircuit(Value),
    /// Replace the in-progress result with this value. Only meaningful
    /// from an after-hook; ignored with a warning elsewhere.
    ReplaceResult(Value),
}

/// Trait for hook handler implementations.
#[async_trait]
pub trait HookHandler: Send + Sync + fmt::Debug {
    /// Handler name used in logs and error reports.
    fn name(&self) -> &str;

    /// The plugin owning this handler.
    fn plugin_id(&self) -> &str;

    /// Execution priority (lower = runs first). Handlers with equal
    /// priority run in registration order.
    fn priority(&self) -> i32 {
        100
    }

    /// Handles one intercepted call.
    ///
    /// Errors are caught at the dispatch boundary and resolved according
    /// to the dispatcher's failure policy; they never crash the host call
    /// silently.
    async fn handle(&self, call: &InterceptedCall) -> Result<HookOutcome, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_as_str() {
        assert_eq!(Operation::QuestComplete.as_str(), "quest_complete");
        assert_eq!(
            Operation::RepeatableUnlockCheck.to_string(),
            "repeatable_unlock_check"
        );
    }

    #[test]
    fn test_call_arg_accessors() {
        let quest_id = Uuid::new_v4();
        let call = InterceptedCall::new(Operation::QuestComplete, SessionId::new())
            .with_uuid_arg("quest_id", quest_id)
            .with_arg("instant", serde_json::json!(true));

        assert_eq!(call.arg_uuid("quest_id"), Some(quest_id));
        assert_eq!(call.arg_bool("instant"), Some(true));
        assert!(call.arg("missing").is_none());
    }

    #[test]
    fn test_new_call_is_pending() {
        let call = InterceptedCall::new(Operation::RepeatableUnlockCheck, SessionId::new());
        assert_eq!(call.phase(), CallPhase::Pending);
        assert!(!call.short_circuited());
        assert!(call.result().is_none());
    }
}
