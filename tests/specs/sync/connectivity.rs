//! Connectivity specs
//!
//! Verify the sync loop drains when the client comes back online and stops
//! when it drops off again.

use crate::prelude::*;
use similar_asserts::assert_eq;
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

async fn next(results: &mut mpsc::Receiver<DrainResult>) -> DrainResult {
    timeout(WAIT, results.recv())
        .await
        .expect("timed out waiting for a drain")
        .expect("sync loop closed the channel")
}

#[tokio::test]
async fn edits_made_offline_sync_when_back_online() {
    let client = Client::in_memory();
    client.edit(ActionKind::Create, "a").await;
    client.edit(ActionKind::Create, "b").await;
    let executor = client.executor.clone();
    let queue = Arc::new(client.queue);

    let (monitor, watch) = ConnectivityMonitor::new(Connectivity::Offline);
    let (tx, mut results) = mpsc::channel(4);
    let handle = SyncLoop::new(Arc::clone(&queue), watch, tx).spawn();

    monitor.set_online();
    let result = next(&mut results).await;

    assert_eq!(ids(&result.succeeded), strings(&["act-1", "act-2"]));
    assert_eq!(queue.pending_count(), 0);
    assert_eq!(executor.call_count(), 2);

    drop(monitor);
    timeout(WAIT, handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn going_offline_mid_drain_leaves_the_rest_queued() {
    let client = Client::in_memory();
    for memo in ["a", "b", "c"] {
        client.edit(ActionKind::Create, memo).await;
    }
    let executor = client.executor.clone();
    executor.set_delay(Duration::from_millis(50));
    let started = Arc::new(tokio::sync::Notify::new());
    let signal = Arc::clone(&started);
    executor.on_execute(move |_| signal.notify_one());
    let queue = Arc::new(client.queue);

    let (monitor, watch) = ConnectivityMonitor::new(Connectivity::Offline);
    let (tx, mut results) = mpsc::channel(4);
    SyncLoop::new(Arc::clone(&queue), watch, tx).spawn();

    monitor.set_online();
    timeout(WAIT, started.notified()).await.unwrap();
    monitor.set_offline();
    let result = next(&mut results).await;

    assert!(result.cancelled);
    assert_eq!(ids(&result.succeeded), strings(&["act-1"]));
    let pending: Vec<String> = queue
        .snapshot()
        .iter()
        .map(|a| a.id.to_string())
        .collect();
    assert_eq!(pending, strings(&["act-2", "act-3"]));
    assert!(queue.snapshot().iter().all(|a| a.attempts == 0));
}

#[tokio::test]
async fn staying_offline_never_touches_the_backend() {
    let client = Client::in_memory();
    client.edit(ActionKind::Create, "a").await;
    let executor = client.executor.clone();

    let (monitor, watch) = ConnectivityMonitor::new(Connectivity::Offline);
    let (tx, mut results) = mpsc::channel(4);
    let handle = SyncLoop::new(Arc::new(client.queue), watch, tx).spawn();

    monitor.set_offline();
    drop(monitor);
    timeout(WAIT, handle).await.unwrap().unwrap();

    assert!(results.recv().await.is_none());
    assert_eq!(executor.call_count(), 0);
}
