//! Hook registry — ordered before/after handler chains per operation.
//!
//! Chains are fixed at startup and read-many afterwards; registration is
//! never concurrent with dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::definitions::{HookHandler, HookPhase, Operation};

/// Entry in a hook chain.
#[derive(Debug)]
struct HookEntry {
    /// The handler.
    handler: Arc<dyn HookHandler>,
    /// Priority (lower = earlier execution).
    priority: i32,
    /// Plugin that registered this handler.
    plugin_id: String,
}

/// Before and after chains for one operation.
#[derive(Debug, Default)]
struct OperationHooks {
    before: Vec<HookEntry>,
    after: Vec<HookEntry>,
}

/// Registry of hook handlers organized by operation and phase.
///
/// Handlers for the same operation and phase execute in ascending
/// priority; equal priorities keep registration order. That ordering is a
/// contract — paired before/after handlers rely on it.
#[derive(Debug, Default)]
pub struct HookRegistry {
    /// Operation → before/after chains.
    hooks: RwLock<HashMap<Operation, OperationHooks>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a before-hook for an operation.
    pub async fn register_before(&self, operation: Operation, handler: Arc<dyn HookHandler>) {
        self.register(operation, HookPhase::Before, handler).await;
    }

    /// Registers an after-hook for an operation.
    pub async fn register_after(&self, operation: Operation, handler: Arc<dyn HookHandler>) {
        self.register(operation, HookPhase::After, handler).await;
    }

    /// Registers a handler on the given phase of an operation.
    pub async fn register(
        &self,
        operation: Operation,
        phase: HookPhase,
        handler: Arc<dyn HookHandler>,
    ) {
        let plugin_id = handler.plugin_id().to_string();
        let priority = handler.priority();
        let name = handler.name().to_string();

        let mut hooks = self.hooks.write().await;
        let chain = match phase {
            HookPhase::Before => &mut hooks.entry(operation).or_default().before,
            HookPhase::After => &mut hooks.entry(operation).or_default().after,
        };

        chain.push(HookEntry {
            handler,
            priority,
            plugin_id: plugin_id.clone(),
        });

        // Stable sort: equal priorities keep registration order.
        chain.sort_by_key(|e| e.priority);

        info!(
            operation = %operation,
            phase = %phase,
            handler = %name,
            plugin_id = %plugin_id,
            priority = priority,
            "Hook handler registered"
        );
    }

    /// Unregisters all handlers owned by a plugin.
    pub async fn unregister_plugin(&self, plugin_id: &str) {
        let mut hooks = self.hooks.write().await;

        for chains in hooks.values_mut() {
            chains.before.retain(|e| e.plugin_id != plugin_id);
            chains.after.retain(|e| e.plugin_id != plugin_id);
        }

        hooks.retain(|_, chains| !chains.before.is_empty() || !chains.after.is_empty());

        info!(plugin_id = %plugin_id, "All hooks unregistered for plugin");
    }

    /// Returns the handler chain for one phase of an operation, in
    /// execution order.
    pub async fn handlers(
        &self,
        operation: Operation,
        phase: HookPhase,
    ) -> Vec<Arc<dyn HookHandler>> {
        let hooks = self.hooks.read().await;
        hooks
            .get(&operation)
            .map(|chains| {
                let chain = match phase {
                    HookPhase::Before => &chains.before,
                    HookPhase::After => &chains.after,
                };
                chain.iter().map(|e| e.handler.clone()).collect()
            })
            .unwrap_or_default()
    }

    /// Returns whether any handlers are registered for an operation.
    pub async fn has_handlers(&self, operation: Operation) -> bool {
        let hooks = self.hooks.read().await;
        hooks
            .get(&operation)
            .map(|chains| !chains.before.is_empty() || !chains.after.is_empty())
            .unwrap_or(false)
    }

    /// Returns the number of handlers on one phase of an operation.
    pub async fn handler_count(&self, operation: Operation, phase: HookPhase) -> usize {
        self.handlers(operation, phase).await.len()
    }

    /// Returns all operations with at least one registered handler.
    pub async fn registered_operations(&self) -> Vec<Operation> {
        let hooks = self.hooks.read().await;
        hooks.keys().copied().collect()
    }
}
