//! Plugin registry — stores loaded plugin instances and metadata.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use raidhub_core::{AppError, AppResult};

use crate::api::context::HostContext;
use crate::hooks::definitions::{HookHandler, HookPhase, Operation};

/// One requested hook installation: operation, phase, handler.
pub type HookBinding = (Operation, HookPhase, Arc<dyn HookHandler>);

/// Metadata about a loaded plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Author or maintainer.
    pub author: String,
    /// Operations this plugin hooks into.
    pub hooks: Vec<String>,
    /// Load priority (lower = loaded first).
    pub priority: i32,
}

/// Trait that all plugins must implement.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Called once when the plugin is loaded. Configuration application
    /// happens here; an error aborts the load and no hooks are installed.
    async fn on_load(&self, ctx: &HostContext) -> AppResult<()>;

    /// Called when the plugin is started, after its hooks are installed.
    async fn on_start(&self) -> AppResult<()>;

    /// Called when the plugin is stopped, before its hooks are removed.
    async fn on_stop(&self) -> AppResult<()>;

    /// Returns the hook installations this plugin requests.
    fn hook_bindings(&self, ctx: &HostContext) -> Vec<HookBinding>;
}

/// Registry of all loaded plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Plugin ID → plugin instance.
    plugins: RwLock<HashMap<String, Arc<dyn Plugin>>>,
    /// Plugin ID → metadata.
    metadata: RwLock<HashMap<String, PluginInfo>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> AppResult<()> {
        let info = plugin.info();
        let id = info.id.clone();

        let mut plugins = self.plugins.write().await;
        let mut metadata = self.metadata.write().await;

        if plugins.contains_key(&id) {
            return Err(AppError::conflict(format!(
                "Plugin '{id}' is already registered"
            )));
        }

        info!(plugin_id = %id, name = %info.name, version = %info.version, "Registering plugin");

        plugins.insert(id.clone(), plugin);
        metadata.insert(id, info);

        Ok(())
    }

    /// Unregisters a plugin by ID.
    pub async fn unregister(&self, plugin_id: &str) -> AppResult<Arc<dyn Plugin>> {
        let mut plugins = self.plugins.write().await;
        let mut metadata = self.metadata.write().await;

        let plugin = plugins
            .remove(plugin_id)
            .ok_or_else(|| AppError::not_found(format!("Plugin '{plugin_id}' not found")))?;

        metadata.remove(plugin_id);

        info!(plugin_id = %plugin_id, "Plugin unregistered");

        Ok(plugin)
    }

    /// Gets a plugin by ID.
    pub async fn get(&self, plugin_id: &str) -> Option<Arc<dyn Plugin>> {
        let plugins = self.plugins.read().await;
        plugins.get(plugin_id).cloned()
    }

    /// Lists all registered plugin metadata, in load-priority order.
    pub async fn list(&self) -> Vec<PluginInfo> {
        let metadata = self.metadata.read().await;
        let mut infos: Vec<PluginInfo> = metadata.values().cloned().collect();
        infos.sort_by_key(|info| info.priority);
        infos
    }

    /// Returns plugin count.
    pub async fn count(&self) -> usize {
        let plugins = self.plugins.read().await;
        plugins.len()
    }

    /// Checks whether a plugin is registered.
    pub async fn contains(&self, plugin_id: &str) -> bool {
        let plugins = self.plugins.read().await;
        plugins.contains_key(plugin_id)
    }
}
