//! Retry specs
//!
//! Verify the attempt cap, permanent failures, and that one failing action
//! never blocks the ones behind it.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn always_failing_action_is_attempted_max_attempts_times() {
    let client = Client::in_memory();
    let id = client.edit(ActionKind::Create, "a").await;
    client
        .executor
        .fail_always(id.as_str(), ExecuteError::transient("connection reset"));

    let mut abandoned_on = None;
    for pass in 1..=5 {
        let result = client.drain().await;
        if result.abandoned.contains(&id) {
            abandoned_on = Some(pass);
        }
    }

    assert_eq!(abandoned_on, Some(3));
    assert_eq!(client.executor.call_count(), 3);
    assert!(client.queue.snapshot().is_empty());
}

#[tokio::test]
async fn per_action_cap_overrides_default() {
    let client = Client::in_memory();
    let id = client
        .queue
        .enqueue(ActionKind::Update, "budget", json!({ "limit": 400 }), Some(1))
        .await;
    client
        .executor
        .fail_always("budget", ExecuteError::transient("timeout"));

    let result = client.drain().await;

    assert_eq!(result.abandoned, vec![id]);
    assert_eq!(client.executor.call_count(), 1);
}

#[tokio::test]
async fn permanent_failure_abandons_without_retry() {
    let client = Client::in_memory();
    let x = client
        .queue
        .enqueue(ActionKind::Create, "transaction", json!({}), Some(3))
        .await;
    client.executor.push_outcome(
        x.as_str(),
        Err(ExecuteError::permanent("422 amount is required")),
    );

    let result = client.drain().await;

    assert!(client.queue.snapshot().is_empty());
    assert_eq!(result.abandoned, vec![x]);
    assert!(result.retried_but_pending.is_empty());

    client.drain().await;
    assert_eq!(client.executor.call_count(), 1);
}

#[tokio::test]
async fn failure_in_the_middle_does_not_block_the_tail() {
    let client = Client::in_memory();
    let a = client.edit(ActionKind::Create, "a").await;
    let b = client.edit(ActionKind::Create, "b").await;
    let c = client.edit(ActionKind::Create, "c").await;
    client
        .executor
        .push_outcome(b.as_str(), Err(ExecuteError::transient("502")));

    let result = client.drain().await;

    assert_eq!(result.succeeded, vec![a, c]);
    assert_eq!(result.retried_but_pending, vec![b.clone()]);
    let remaining = client.queue.snapshot();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, b);
    assert_eq!(remaining[0].attempts, 1);
}

#[tokio::test]
async fn recovered_backend_applies_retried_action() {
    let client = Client::in_memory();
    let id = client.edit(ActionKind::Create, "a").await;
    client
        .executor
        .fail_always(id.as_str(), ExecuteError::transient("offline"));
    client.drain().await;

    client.executor.recover(id.as_str());
    let result = client.drain().await;

    assert_eq!(result.succeeded, vec![id]);
    assert_eq!(client.executor.calls()[1].attempts, 1);
}
