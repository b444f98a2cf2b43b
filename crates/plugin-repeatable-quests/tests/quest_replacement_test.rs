//! Integration tests for instant repeatable quest replacement.

mod helpers;

use std::sync::Arc;

use plugin_repeatable_quests::RepeatableQuestTunerPlugin;
use plugin_repeatable_quests::hooks::QUEST_ID_ARG;
use raidhub_core::config::CategoryKind;
use raidhub_core::types::{SessionId, VendorId};
use raidhub_entity::response::EventResponse;
use raidhub_plugin::PluginManager;
use raidhub_plugin::hooks::definitions::{InterceptedCall, Operation};

async fn manager_with_plugin(host: &helpers::TestHost) -> PluginManager {
    let manager = PluginManager::new(Arc::new(host.ctx.clone()));
    let plugin = Arc::new(RepeatableQuestTunerPlugin::new(
        helpers::tuning(true, false),
        VendorId::new(),
    ));
    manager.load_plugin(plugin).await.expect("load plugin");
    manager
}

fn completion_call(session_id: SessionId, quest_id: raidhub_core::types::QuestId) -> InterceptedCall {
    InterceptedCall::new(Operation::QuestComplete, session_id)
        .with_uuid_arg(QUEST_ID_ARG, quest_id.into_uuid())
}

async fn complete(
    manager: &PluginManager,
    session_id: SessionId,
    quest_id: raidhub_core::types::QuestId,
) -> EventResponse {
    let base = serde_json::to_value(EventResponse::for_session(session_id)).expect("serialize");
    let done = manager
        .dispatcher()
        .intercept(completion_call(session_id, quest_id), move |_| async move {
            Ok(base)
        })
        .await
        .expect("intercept");

    serde_json::from_value(done.into_result().expect("result present")).expect("deserialize")
}

#[tokio::test]
async fn test_completed_repeatable_is_replaced_in_response() {
    let host = helpers::test_host();
    let session_id = SessionId::new();

    let completed = helpers::quest("Supply Run");
    let completed_id = completed.id;
    let profile = host.profiles.insert(
        session_id,
        helpers::profile_with_groups(
            20,
            vec![
                helpers::group_with(CategoryKind::Daily, vec![completed]),
                helpers::group_with(CategoryKind::Weekly, vec![helpers::quest("Long Haul")]),
            ],
        ),
    );
    host.generator
        .push(CategoryKind::Daily, helpers::quest("Fresh Supply Run"));

    let manager = manager_with_plugin(&host).await;
    let response = complete(&manager, session_id, completed_id).await;

    let changes = response.changes(session_id).expect("changes for session");
    let refreshed = changes
        .repeatable_quests
        .as_ref()
        .expect("repeatables refreshed");
    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].kind, CategoryKind::Daily);
    assert_eq!(refreshed[0].active_quests.len(), 2);

    let replacement = refreshed[0]
        .active_quests
        .iter()
        .find(|q| q.name == "Fresh Supply Run")
        .expect("replacement present");
    assert_eq!(replacement.side.as_deref(), Some("scout"));
    assert!(refreshed[0].change_requirements.contains_key(&replacement.id));

    // The live profile gained the replacement; the weekly group is untouched.
    let profile = profile.read().await;
    assert_eq!(
        profile
            .group(CategoryKind::Daily)
            .expect("daily group")
            .active_quests
            .len(),
        2
    );
    let weekly = profile.group(CategoryKind::Weekly).expect("weekly group");
    assert_eq!(weekly.active_quests.len(), 1);
    assert_eq!(weekly.active_quests[0].name, "Long Haul");
}

#[tokio::test]
async fn test_failed_generation_leaves_response_untouched() {
    let host = helpers::test_host();
    let session_id = SessionId::new();

    let completed = helpers::quest("Supply Run");
    let completed_id = completed.id;
    let profile = host.profiles.insert(
        session_id,
        helpers::profile_with_groups(
            20,
            vec![helpers::group_with(CategoryKind::Daily, vec![completed])],
        ),
    );
    // No canned replacement queued: the generator yields None.

    let manager = manager_with_plugin(&host).await;
    let response = complete(&manager, session_id, completed_id).await;

    let changes = response.changes(session_id).expect("changes for session");
    assert!(changes.repeatable_quests.is_none());
    assert_eq!(host.generator.calls().len(), 1);

    let profile = profile.read().await;
    assert_eq!(
        profile
            .group(CategoryKind::Daily)
            .expect("daily group")
            .active_quests
            .len(),
        1
    );
}

#[tokio::test]
async fn test_non_repeatable_completion_passes_through() {
    let host = helpers::test_host();
    let session_id = SessionId::new();

    host.profiles.insert(
        session_id,
        helpers::profile_with_groups(
            20,
            vec![helpers::group_with(CategoryKind::Daily, vec![helpers::quest("Supply Run")])],
        ),
    );

    let manager = manager_with_plugin(&host).await;
    // A story quest id no repeatable group knows about.
    let response = complete(&manager, session_id, raidhub_core::types::QuestId::new()).await;

    let changes = response.changes(session_id).expect("changes for session");
    assert!(changes.repeatable_quests.is_none());
    assert!(host.generator.calls().is_empty());
}

#[tokio::test]
async fn test_concurrent_completions_do_not_share_remembered_state() {
    let host = helpers::test_host();
    let session_a = SessionId::new();
    let session_b = SessionId::new();

    let daily_quest = helpers::quest("Supply Run");
    let daily_id = daily_quest.id;
    host.profiles.insert(
        session_a,
        helpers::profile_with_groups(
            20,
            vec![helpers::group_with(CategoryKind::Daily, vec![daily_quest])],
        ),
    );

    let weekly_quest = helpers::quest("Long Haul");
    let weekly_id = weekly_quest.id;
    host.profiles.insert(
        session_b,
        helpers::profile_with_groups(
            30,
            vec![helpers::group_with(CategoryKind::Weekly, vec![weekly_quest])],
        ),
    );

    host.generator
        .push(CategoryKind::Daily, helpers::quest("Fresh Daily"));
    host.generator
        .push(CategoryKind::Weekly, helpers::quest("Fresh Weekly"));

    let manager = manager_with_plugin(&host).await;
    let (response_a, response_b) = tokio::join!(
        complete(&manager, session_a, daily_id),
        complete(&manager, session_b, weekly_id),
    );

    let refreshed_a = response_a
        .changes(session_a)
        .expect("changes for session a")
        .repeatable_quests
        .as_ref()
        .expect("session a refreshed");
    assert_eq!(refreshed_a.len(), 1);
    assert_eq!(refreshed_a[0].kind, CategoryKind::Daily);
    assert!(refreshed_a[0].active_quests.iter().any(|q| q.name == "Fresh Daily"));

    let refreshed_b = response_b
        .changes(session_b)
        .expect("changes for session b")
        .repeatable_quests
        .as_ref()
        .expect("session b refreshed");
    assert_eq!(refreshed_b.len(), 1);
    assert_eq!(refreshed_b[0].kind, CategoryKind::Weekly);
    assert!(refreshed_b[0].active_quests.iter().any(|q| q.name == "Fresh Weekly"));

    // Each session's generation used its own remembered category.
    let calls = host.generator.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.contains(&(CategoryKind::Daily, session_a)));
    assert!(calls.contains(&(CategoryKind::Weekly, session_b)));
}
