//! Plugin lifecycle tests: hook installation, fatal target checks, unload.

mod helpers;

use std::sync::Arc;

use plugin_repeatable_quests::RepeatableQuestTunerPlugin;
use plugin_repeatable_quests::hooks::PLUGIN_ID;
use raidhub_core::config::CategoryKind;
use raidhub_core::error::ErrorKind;
use raidhub_core::types::VendorId;
use raidhub_plugin::hooks::definitions::{HookPhase, Operation};
use raidhub_plugin::hooks::dispatcher::FailurePolicy;
use raidhub_plugin::PluginManager;

#[tokio::test]
async fn test_load_installs_exactly_the_toggled_hooks() {
    let host = helpers::test_host();
    let manager = PluginManager::new(Arc::new(host.ctx.clone()));
    let plugin = Arc::new(RepeatableQuestTunerPlugin::new(
        helpers::tuning(true, true),
        VendorId::new(),
    ));

    manager.load_plugin(plugin).await.expect("load plugin");

    let hooks = manager.hook_registry();
    assert_eq!(
        hooks.handler_count(Operation::QuestComplete, HookPhase::Before).await,
        1
    );
    assert_eq!(
        hooks.handler_count(Operation::QuestComplete, HookPhase::After).await,
        1
    );
    assert_eq!(
        hooks
            .handler_count(Operation::RepeatableUnlockCheck, HookPhase::Before)
            .await,
        1
    );

    let plugins = manager.list_plugins().await;
    assert_eq!(plugins.len(), 1);
    assert_eq!(plugins[0].id, PLUGIN_ID);
    assert_eq!(plugins[0].hooks.len(), 2);
}

#[tokio::test]
async fn test_unadvertised_operation_is_fatal_and_installs_nothing() {
    let host = helpers::test_host();
    // This host only dispatches quest completion.
    let manager = PluginManager::with_options(
        Arc::new(host.ctx.clone()),
        [Operation::QuestComplete],
        FailurePolicy::default(),
    );
    let plugin = Arc::new(RepeatableQuestTunerPlugin::new(
        helpers::tuning(true, true),
        VendorId::new(),
    ));

    let err = manager.load_plugin(plugin).await.expect_err("must fail");
    assert_eq!(err.kind, ErrorKind::Plugin);

    // The load aborted before any side effect: no plugin, no hooks, and
    // the shared configuration was never scaled.
    assert_eq!(manager.list_plugins().await.len(), 0);
    assert!(
        !manager
            .hook_registry()
            .has_handlers(Operation::QuestComplete)
            .await
    );
    let config = host.quest_config.read().await;
    let daily = config.category(CategoryKind::Daily).expect("daily block");
    assert_eq!(daily.reward_scaling.experience, vec![100.0, 200.0]);
}

#[tokio::test]
async fn test_unload_removes_every_hook() {
    let host = helpers::test_host();
    let manager = PluginManager::new(Arc::new(host.ctx.clone()));
    let plugin = Arc::new(RepeatableQuestTunerPlugin::new(
        helpers::tuning(true, true),
        VendorId::new(),
    ));

    manager.load_plugin(plugin).await.expect("load plugin");
    manager.unload_plugin(PLUGIN_ID).await.expect("unload plugin");

    assert_eq!(manager.list_plugins().await.len(), 0);
    assert!(
        !manager
            .hook_registry()
            .has_handlers(Operation::QuestComplete)
            .await
    );
    assert!(
        !manager
            .hook_registry()
            .has_handlers(Operation::RepeatableUnlockCheck)
            .await
    );
    assert!(
        manager
            .hook_registry()
            .registered_operations()
            .await
            .is_empty()
    );
}
