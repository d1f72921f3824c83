//! Concurrency specs
//!
//! Verify only one drain ever walks the queue at a time.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn second_drain_while_one_runs_is_rejected() {
    let client = Client::in_memory();
    for memo in ["a", "b", "c"] {
        client.edit(ActionKind::Create, memo).await;
    }
    client.executor.set_delay(Duration::from_millis(20));

    let (first, second) = tokio::join!(client.queue.drain(), async {
        tokio::task::yield_now().await;
        client.queue.drain().await
    });

    assert!(matches!(second, Err(SyncError::DrainInProgress)));
    assert_eq!(first.unwrap().succeeded.len(), 3);
    // One pass only: every action executed exactly once
    assert_eq!(client.executor.call_count(), 3);
    assert_eq!(client.executor.max_in_flight(), 1);
}

#[tokio::test]
async fn drain_is_accepted_again_after_the_first_finishes() {
    let client = Client::in_memory();
    client.edit(ActionKind::Create, "a").await;
    client.drain().await;

    client.edit(ActionKind::Create, "b").await;
    let result = client.queue.drain().await;

    assert_eq!(ids(&result.unwrap().succeeded), strings(&["act-2"]));
}

#[tokio::test]
async fn clear_discards_everything_pending() {
    let client = Client::in_memory();
    client.edit(ActionKind::Create, "a").await;
    client.edit(ActionKind::Delete, "b").await;

    assert_eq!(client.queue.clear().await, 2);

    let result = client.drain().await;
    assert!(result.is_empty());
    assert_eq!(client.executor.call_count(), 0);
}
