//! Plugin manager — lifecycle management for all plugins.
//!
//! The manager is the host-side loader: it verifies every requested hook
//! target against the operations the host actually dispatches, runs the
//! plugin lifecycle, and owns the hook registry and dispatcher.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info, warn};

use raidhub_core::{AppError, AppResult};

use crate::api::context::HostContext;
use crate::error::InterceptionError;
use crate::hooks::definitions::Operation;
use crate::hooks::dispatcher::{FailurePolicy, HookDispatcher};
use crate::hooks::registry::HookRegistry;
use crate::registry::{Plugin, PluginInfo, PluginRegistry};

/// Manages the full lifecycle of plugins: load, start, stop, unload.
#[derive(Debug)]
pub struct PluginManager {
    /// Capabilities injected into plugins.
    host: Arc<HostContext>,
    /// Operations the host dispatches through the hook system.
    supported_operations: HashSet<Operation>,
    /// Plugin registry.
    plugin_registry: Arc<PluginRegistry>,
    /// Hook registry.
    hook_registry: Arc<HookRegistry>,
    /// Hook dispatcher.
    hook_dispatcher: Arc<HookDispatcher>,
}

impl PluginManager {
    /// Creates a manager advertising every stock operation, with the
    /// default fall-back failure policy.
    pub fn new(host: Arc<HostContext>) -> Self {
        Self::with_options(host, Operation::ALL, FailurePolicy::default())
    }

    /// Creates a manager advertising an explicit operation set and
    /// failure policy.
    pub fn with_options(
        host: Arc<HostContext>,
        operations: impl IntoIterator<Item = Operation>,
        failure_policy: FailurePolicy,
    ) -> Self {
        let hook_registry = Arc::new(HookRegistry::new());
        let hook_dispatcher = Arc::new(HookDispatcher::with_failure_policy(
            hook_registry.clone(),
            failure_policy,
        ));

        Self {
            host,
            supported_operations: operations.into_iter().collect(),
            plugin_registry: Arc::new(PluginRegistry::new()),
            hook_registry,
            hook_dispatcher,
        }
    }

    /// Loads and starts a compiled-in plugin.
    ///
    /// Order matters: hook targets are verified before `on_load` runs so
    /// that a plugin whose override contract cannot be honored performs
    /// no configuration changes at all.
    pub async fn load_plugin(&self, plugin: Arc<dyn Plugin>) -> AppResult<()> {
        let info = plugin.info();
        let plugin_id = info.id.clone();

        let bindings = plugin.hook_bindings(&self.host);
        for (operation, _, _) in &bindings {
            if !self.supported_operations.contains(operation) {
                error!(
                    plugin_id = %plugin_id,
                    operation = %operation,
                    "Plugin requests a hook on an operation this host does not dispatch"
                );
                return Err(InterceptionError::UnsupportedOperation {
                    operation: *operation,
                }
                .into());
            }
        }

        plugin.on_load(&self.host).await.map_err(|e| {
            error!(plugin_id = %plugin_id, error = %e, "Plugin load failed");
            AppError::plugin(format!("Plugin '{plugin_id}' load failed: {e}"))
        })?;

        self.plugin_registry.register(plugin.clone()).await?;

        let hook_count = bindings.len();
        for (operation, phase, handler) in bindings {
            self.hook_registry.register(operation, phase, handler).await;
        }

        plugin.on_start().await.map_err(|e| {
            error!(plugin_id = %plugin_id, error = %e, "Plugin start failed");
            AppError::plugin(format!("Plugin '{plugin_id}' start failed: {e}"))
        })?;

        info!(
            plugin_id = %plugin_id,
            name = %info.name,
            version = %info.version,
            hooks = hook_count,
            "Plugin loaded and started"
        );

        Ok(())
    }

    /// Stops and unloads a plugin, removing all of its hooks.
    pub async fn unload_plugin(&self, plugin_id: &str) -> AppResult<()> {
        let plugin = self
            .plugin_registry
            .get(plugin_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Plugin '{plugin_id}' not found")))?;

        if let Err(e) = plugin.on_stop().await {
            warn!(plugin_id = %plugin_id, error = %e, "Plugin stop returned error");
        }

        self.hook_registry.unregister_plugin(plugin_id).await;
        self.plugin_registry.unregister(plugin_id).await?;

        info!(plugin_id = %plugin_id, "Plugin unloaded");

        Ok(())
    }

    /// Stops and unloads all plugins.
    pub async fn unload_all(&self) -> AppResult<()> {
        let plugins = self.plugin_registry.list().await;

        for info in &plugins {
            if let Err(e) = self.unload_plugin(&info.id).await {
                error!(plugin_id = %info.id, error = %e, "Error unloading plugin");
            }
        }

        info!("All plugins unloaded");
        Ok(())
    }

    /// Returns the hook dispatcher the host fires operations through.
    pub fn dispatcher(&self) -> &Arc<HookDispatcher> {
        &self.hook_dispatcher
    }

    /// Returns the hook registry.
    pub fn hook_registry(&self) -> &Arc<HookRegistry> {
        &self.hook_registry
    }

    /// Returns the plugin registry.
    pub fn plugin_registry(&self) -> &Arc<PluginRegistry> {
        &self.plugin_registry
    }

    /// Returns the injected host context.
    pub fn host(&self) -> &Arc<HostContext> {
        &self.host
    }

    /// Lists all loaded plugins.
    pub async fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugin_registry.list().await
    }
}
