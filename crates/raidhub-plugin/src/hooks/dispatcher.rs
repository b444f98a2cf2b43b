//! Hook dispatcher — drives the interception state machine for one call.
//!
//! For before-hooks:
//! - Handlers run in chain order.
//! - The first `ShortCircuit` wins: the chain stops, the default operation
//!   is skipped, and the supplied value becomes the in-progress result.
//! - `ContinueWith` merges values into the call's hand-off state.
//!
//! For after-hooks:
//! - All handlers run in chain order regardless of individual outcomes.
//! - Each `ReplaceResult` swaps the in-progress result.
//!
//! Handler errors never crash the host call silently: they are caught
//! here, logged, and resolved according to the configured
//! [`FailurePolicy`].

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use raidhub_core::AppError;

use super::definitions::{CallPhase, HookOutcome, HookPhase, InterceptedCall, Operation};
use super::registry::HookRegistry;
use crate::error::InterceptionError;

/// What the dispatcher does when a handler returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the error and continue as if the handler returned `Continue`,
    /// so the call falls back to default behavior.
    #[default]
    FallBackToDefault,
    /// Abort the call, surfacing an [`InterceptionError::HandlerFailed`].
    Propagate,
}

/// Dispatches intercepted calls through their hook chains.
#[derive(Debug)]
pub struct HookDispatcher {
    /// Hook registry.
    registry: Arc<HookRegistry>,
    /// Handler failure resolution.
    failure_policy: FailurePolicy,
}

impl HookDispatcher {
    /// Creates a dispatcher with the default fall-back failure policy.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self {
            registry,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Creates a dispatcher with an explicit failure policy.
    pub fn with_failure_policy(registry: Arc<HookRegistry>, failure_policy: FailurePolicy) -> Self {
        Self {
            registry,
            failure_policy,
        }
    }

    /// The configured failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    /// Drives one call through the full interception cycle:
    /// before chain → default operation (unless short-circuited) → after
    /// chain. Returns the completed call; its result is the operation's
    /// final answer.
    ///
    /// `default_op` is the host's own implementation of the operation. An
    /// error from it is the host's failure and propagates unchanged.
    pub async fn intercept<F, Fut>(
        &self,
        mut call: InterceptedCall,
        default_op: F,
    ) -> Result<InterceptedCall, AppError>
    where
        F: FnOnce(&InterceptedCall) -> Fut + Send,
        Fut: Future<Output = Result<Value, AppError>> + Send,
    {
        call.set_phase(CallPhase::Before);
        let override_result = self.run_before_chain(&mut call).await?;

        match override_result {
            Some(result) => {
                call.mark_short_circuited();
                call.set_phase(CallPhase::ShortCircuited);
                call.set_result(result);
            }
            None => {
                call.set_phase(CallPhase::PassThrough);
                let result = default_op(&call).await?;
                call.set_result(result);
            }
        }

        call.set_phase(CallPhase::After);
        self.run_after_chain(&mut call).await?;

        call.set_phase(CallPhase::Completed);
        Ok(call)
    }

    /// Runs the before chain. Returns the override result if any handler
    /// short-circuited.
    async fn run_before_chain(
        &self,
        call: &mut InterceptedCall,
    ) -> Result<Option<Value>, AppError> {
        let handlers = self.registry.handlers(call.operation, HookPhase::Before).await;
        if handlers.is_empty() {
            return Ok(None);
        }

        debug!(
            operation = %call.operation,
            session_id = %call.session_id,
            handler_count = handlers.len(),
            "Dispatching before chain"
        );

        for handler in &handlers {
            match handler.handle(call).await {
                Ok(HookOutcome::Continue) => {}
                Ok(HookOutcome::ContinueWith(mods)) => {
                    debug!(
                        operation = %call.operation,
                        handler = %handler.name(),
                        keys = mods.len(),
                        "Handler merged hand-off state"
                    );
                    call.merge_state(mods);
                }
                Ok(HookOutcome::ShortCircuit(result)) => {
                    info!(
                        operation = %call.operation,
                        session_id = %call.session_id,
                        handler = %handler.name(),
                        "Handler short-circuited the default operation"
                    );
                    return Ok(Some(result));
                }
                Ok(HookOutcome::ReplaceResult(_)) => {
                    warn!(
                        operation = %call.operation,
                        handler = %handler.name(),
                        "Handler returned ReplaceResult from a before-hook, ignoring"
                    );
                }
                Err(err) => self.resolve_failure(call, handler.name(), err)?,
            }
        }

        Ok(None)
    }

    /// Runs the after chain, applying result replacements in order.
    async fn run_after_chain(&self, call: &mut InterceptedCall) -> Result<(), AppError> {
        let handlers = self.registry.handlers(call.operation, HookPhase::After).await;
        if handlers.is_empty() {
            return Ok(());
        }

        debug!(
            operation = %call.operation,
            session_id = %call.session_id,
            handler_count = handlers.len(),
            "Dispatching after chain"
        );

        for handler in &handlers {
            match handler.handle(call).await {
                Ok(HookOutcome::Continue) => {}
                Ok(HookOutcome::ContinueWith(mods)) => {
                    call.merge_state(mods);
                }
                Ok(HookOutcome::ReplaceResult(result)) => {
                    debug!(
                        operation = %call.operation,
                        handler = %handler.name(),
                        "Handler replaced the call result"
                    );
                    call.set_result(result);
                }
                Ok(HookOutcome::ShortCircuit(_)) => {
                    warn!(
                        operation = %call.operation,
                        handler = %handler.name(),
                        "Handler returned ShortCircuit from an after-hook, ignoring"
                    );
                }
                Err(err) => self.resolve_failure(call, handler.name(), err)?,
            }
        }

        Ok(())
    }

    /// Resolves a handler error according to the failure policy.
    fn resolve_failure(
        &self,
        call: &InterceptedCall,
        handler: &str,
        err: AppError,
    ) -> Result<(), AppError> {
        match self.failure_policy {
            FailurePolicy::FallBackToDefault => {
                error!(
                    operation = %call.operation,
                    session_id = %call.session_id,
                    handler = %handler,
                    error = %err,
                    "Hook handler failed, falling back to default behavior"
                );
                Ok(())
            }
            FailurePolicy::Propagate => Err(InterceptionError::HandlerFailed {
                operation: call.operation,
                handler: handler.to_string(),
                source: err,
            }
            .into()),
        }
    }
}
