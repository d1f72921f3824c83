// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote write execution

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ExecutorCall, FakeExecutor};

use async_trait::async_trait;
use syncq_core::{ExecuteOutcome, QueuedAction};

/// Performs one queued write against the backend
///
/// The queue calls `execute` at most once per action per drain, but the same
/// action is retried across drains after a transient failure. A retried write
/// may therefore reach the backend more than once; if the backend cannot
/// deduplicate on its own, callers must embed an idempotency key in the
/// action's `payload` and the executor must forward it. The queue never
/// generates one.
///
/// Return `ExecuteError::Permanent` for writes that can never succeed so the
/// queue abandons them without spending further attempts.
#[async_trait]
pub trait RemoteWriteExecutor: Clone + Send + Sync + 'static {
    async fn execute(&self, action: &QueuedAction) -> ExecuteOutcome;
}
