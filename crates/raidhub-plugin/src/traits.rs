//! Closure-based hook handlers for quick handler creation.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use raidhub_core::AppError;

use crate::hooks::definitions::{HookHandler, HookOutcome, InterceptedCall};

/// A closure-based hook handler.
///
/// Useful for small overrides and tests where a dedicated handler struct
/// is not worth defining.
pub struct ClosureHandler {
    /// Owning plugin ID; doubles as the handler name.
    id: String,
    /// Priority.
    priority_val: i32,
    /// Handler function.
    handler: Arc<
        dyn for<'a> Fn(&'a InterceptedCall) -> BoxFuture<'a, Result<HookOutcome, AppError>>
            + Send
            + Sync,
    >,
}

impl std::fmt::Debug for ClosureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("id", &self.id)
            .field("priority_val", &self.priority_val)
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureHandler {
    /// Creates a new closure-based handler.
    pub fn new<F, Fut>(plugin_id: &str, priority: i32, handler: F) -> Self
    where
        F: Fn(&InterceptedCall) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<HookOutcome, AppError>> + Send + 'static,
    {
        Self {
            id: plugin_id.to_string(),
            priority_val: priority,
            handler: Arc::new(move |call| {
                let fut = handler(call);
                Box::pin(fut)
            }),
        }
    }
}

#[async_trait]
impl HookHandler for ClosureHandler {
    fn name(&self) -> &str {
        &self.id
    }

    fn plugin_id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority_val
    }

    async fn handle(&self, call: &InterceptedCall) -> Result<HookOutcome, AppError> {
        (self.handler)(call).await
    }
}
