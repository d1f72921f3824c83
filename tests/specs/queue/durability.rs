//! Durability specs
//!
//! Verify the queue survives a process restart through the file store.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn enqueued_actions_survive_a_restart() {
    let dir = StateDir::new();
    let before = {
        let client = dir.client();
        client.edit(ActionKind::Create, "rent").await;
        client.edit(ActionKind::Update, "rent, split").await;
        client.queue.snapshot()
    };

    let client = dir.client();

    assert_eq!(client.queue.snapshot(), before);
    assert!(client.queue.snapshot().iter().all(|a| a.attempts == 0));
}

#[tokio::test]
async fn retry_history_survives_a_restart() {
    let dir = StateDir::new();
    {
        let client = dir.client();
        let id = client.edit(ActionKind::Create, "a").await;
        client
            .executor
            .push_outcome(id.as_str(), Err(ExecuteError::transient("503")));
        client.drain().await;
    }

    let client = dir.client();
    client
        .executor
        .fail_always("transaction", ExecuteError::transient("503"));

    assert_eq!(client.queue.snapshot()[0].attempts, 1);
    assert!(client.queue.last_sync_at().is_some());

    client.drain().await;
    let result = client.drain().await;
    assert_eq!(ids(&result.abandoned), strings(&["act-1"]));
}

#[tokio::test]
async fn ids_stay_unique_after_a_restart() {
    let dir = StateDir::new();
    {
        let client = dir.client();
        client.edit(ActionKind::Create, "a").await;
        client.edit(ActionKind::Create, "b").await;
    }

    let client = dir.client();
    let id = client.edit(ActionKind::Create, "c").await;

    assert_eq!(id, ActionId::new("act-3"));
    assert_eq!(client.pending_ids(), strings(&["act-1", "act-2", "act-3"]));
}

#[tokio::test]
async fn record_uses_the_documented_layout() {
    let dir = StateDir::new();
    let client = dir.client();
    client
        .queue
        .enqueue(ActionKind::Delete, "category", json!({ "id": 7 }), Some(5))
        .await;

    let raw = std::fs::read_to_string(dir.record_path()).unwrap();
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(record["lastSyncAt"], serde_json::Value::Null);
    let action = &record["actions"][0];
    assert_eq!(action["id"], json!("act-1"));
    assert_eq!(action["kind"], json!("Delete"));
    assert_eq!(action["resource"], json!("category"));
    assert_eq!(action["payload"], json!({ "id": 7 }));
    assert_eq!(action["attempts"], json!(0));
    assert_eq!(action["maxAttempts"], json!(5));
    assert!(action["enqueuedAt"].as_str().is_some());
}

#[tokio::test]
async fn missing_record_opens_as_empty_queue() {
    let dir = StateDir::new();

    let client = dir.client();

    assert_eq!(client.queue.pending_count(), 0);
    assert!(client.queue.last_sync_at().is_none());
    assert!(!dir.record_path().exists());
}

#[test]
fn corrupt_record_refuses_to_open() {
    let dir = StateDir::new();
    std::fs::write(dir.record_path(), "{ not json").unwrap();
    let config = dir.config();

    let result = OfflineSyncQueue::open(
        QueueDeps {
            executor: FakeExecutor::new(),
            store: syncq_engine::file_store(&config).unwrap(),
            reporter: FakeReporter::new(),
        },
        FakeClock::new(),
        SequentialIdGen::new("act"),
        config,
    );

    assert!(matches!(result, Err(SyncError::Store(_))));
}

#[tokio::test]
async fn failed_write_keeps_action_and_reports() {
    let store = MemoryStore::new();
    let client = Client::open(store.clone(), SyncConfig::default());
    store.fail_writes(true);

    let id = client.edit(ActionKind::Create, "a").await;

    assert_eq!(client.pending_ids(), vec![id.to_string()]);
    let reports = client.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].operation.as_str(), "persist");

    store.fail_writes(false);
    client.drain().await;
    let reopened = Client::open(store, SyncConfig::default());
    assert_eq!(reopened.queue.pending_count(), 0);
}

#[tokio::test]
async fn config_file_selects_directory_and_key() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state");
    let config_path = dir.path().join("syncq.toml");
    std::fs::write(
        &config_path,
        format!(
            "storage_key = \"ledger-writes\"\n\
             default_max_attempts = 2\n\
             state_dir = {:?}\n",
            state
        ),
    )
    .unwrap();

    let config = SyncConfig::load(&config_path).unwrap();
    let store = syncq_engine::file_store(&config).unwrap();
    let client = Client::open(store, config);
    client.edit(ActionKind::Create, "a").await;

    assert!(state.join("ledger-writes.json").is_file());
    assert_eq!(client.queue.snapshot()[0].max_attempts, 2);
}
