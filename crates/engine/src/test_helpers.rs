// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for engine tests

use crate::{OfflineSyncQueue, QueueDeps};
use serde_json::json;
use syncq_adapters::{FakeExecutor, FakeReporter};
use syncq_core::{ActionId, ActionKind, FakeClock, SequentialIdGen, SyncConfig};
use syncq_storage::MemoryStore;

pub type TestQueue =
    OfflineSyncQueue<FakeExecutor, MemoryStore, FakeReporter, FakeClock, SequentialIdGen>;

pub struct Harness {
    pub queue: TestQueue,
    pub executor: FakeExecutor,
    pub store: MemoryStore,
    pub reporter: FakeReporter,
    pub clock: FakeClock,
}

pub fn setup() -> Harness {
    setup_with(MemoryStore::new(), SyncConfig::default())
}

pub fn setup_with(store: MemoryStore, config: SyncConfig) -> Harness {
    let executor = FakeExecutor::new();
    let reporter = FakeReporter::new();
    let clock = FakeClock::new();
    let queue = OfflineSyncQueue::open(
        QueueDeps {
            executor: executor.clone(),
            store: store.clone(),
            reporter: reporter.clone(),
        },
        clock.clone(),
        SequentialIdGen::new("act"),
        config,
    )
    .unwrap();

    Harness {
        queue,
        executor,
        store,
        reporter,
        clock,
    }
}

/// Enqueue a transaction create with the default cap
pub async fn enqueue_txn(queue: &TestQueue, memo: &str) -> ActionId {
    queue
        .enqueue(ActionKind::Create, "transaction", json!({"memo": memo}), None)
        .await
}
