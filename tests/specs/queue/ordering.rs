//! Ordering specs
//!
//! Verify actions reach the backend in the order they were enqueued.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn drain_executes_actions_in_enqueue_order() {
    let client = Client::in_memory();
    client.edit(ActionKind::Create, "coffee").await;
    client.edit(ActionKind::Update, "coffee, large").await;
    client.edit(ActionKind::Delete, "coffee").await;

    client.drain().await;

    assert_eq!(
        client.executor.executed_ids(),
        strings(&["act-1", "act-2", "act-3"])
    );
    let kinds: Vec<ActionKind> = client.executor.calls().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ActionKind::Create, ActionKind::Update, ActionKind::Delete]
    );
}

#[tokio::test]
async fn offline_edits_catch_up_in_one_drain() {
    let client = Client::in_memory();
    for memo in ["rent", "groceries", "fuel", "gym", "books"] {
        client.edit(ActionKind::Create, memo).await;
    }
    assert_eq!(client.queue.pending_count(), 5);
    assert_eq!(client.executor.call_count(), 0);
    assert!(client.queue.last_sync_at().is_none());

    let result = client.drain().await;

    assert_eq!(
        ids(&result.succeeded),
        strings(&["act-1", "act-2", "act-3", "act-4", "act-5"])
    );
    assert_eq!(client.executor.executed_ids(), ids(&result.succeeded));
    assert_eq!(client.queue.pending_count(), 0);
    assert!(client.queue.last_sync_at().is_some());
}

#[tokio::test]
async fn pending_actions_keep_relative_order_across_drains() {
    let client = Client::in_memory();
    let a = client.edit(ActionKind::Create, "a").await;
    let b = client.edit(ActionKind::Create, "b").await;
    client
        .executor
        .push_outcome(a.as_str(), Err(ExecuteError::transient("503")));
    client
        .executor
        .push_outcome(b.as_str(), Err(ExecuteError::transient("503")));
    client.drain().await;

    client.edit(ActionKind::Create, "c").await;
    assert_eq!(client.pending_ids(), strings(&["act-1", "act-2", "act-3"]));

    client.drain().await;
    assert_eq!(
        client.executor.executed_ids(),
        strings(&["act-1", "act-2", "act-1", "act-2", "act-3"])
    );
}

#[tokio::test]
async fn snapshot_is_a_detached_copy() {
    let client = Client::in_memory();
    client.edit(ActionKind::Create, "a").await;

    let mut snapshot = client.queue.snapshot();
    snapshot.clear();

    assert_eq!(client.queue.pending_count(), 1);
}
