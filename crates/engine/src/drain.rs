// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Draining the queue against the backend
//!
//! One pass walks the queue front to back and attempts every action once.
//! A failure never blocks later actions: the failed action keeps its place
//! and is retried on the next pass. Actions run strictly one at a time, and
//! cancellation is only observed between actions.

use crate::{OfflineSyncQueue, SyncError};
use std::collections::HashSet;
use syncq_adapters::{ErrorReporter, RemoteWriteExecutor};
use syncq_core::{
    ActionId, Clock, DrainResult, ExecuteError, ExecuteOutcome, IdGen, QueueEvent, QueuedAction,
    SyncEvent,
};
use syncq_storage::KvStore;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

impl<E, S, R, C, I> OfflineSyncQueue<E, S, R, C, I>
where
    E: RemoteWriteExecutor,
    S: KvStore,
    R: ErrorReporter,
    C: Clock,
    I: IdGen,
{
    /// Attempt every pending action once, in order
    ///
    /// Rejected with `SyncError::DrainInProgress` while another pass runs.
    pub async fn drain(&self) -> Result<DrainResult, SyncError> {
        self.drain_until(&CancellationToken::new()).await
    }

    /// Like `drain`, stopping before the next action once `cancel` fires
    ///
    /// The action in flight when cancellation happens is allowed to finish
    /// and its outcome is recorded.
    pub async fn drain_until(&self, cancel: &CancellationToken) -> Result<DrainResult, SyncError> {
        let Some(_guard) = self.try_claim_drain() else {
            tracing::debug!("drain rejected, another pass is running");
            return Err(SyncError::DrainInProgress);
        };

        let span = tracing::info_span!("drain", pending = self.pending_count());
        Ok(self.drain_pass(cancel).instrument(span).await)
    }

    async fn drain_pass(&self, cancel: &CancellationToken) -> DrainResult {
        let mut result = DrainResult::default();
        let mut attempted: HashSet<ActionId> = HashSet::new();

        tracing::info!("starting");

        loop {
            if cancel.is_cancelled() {
                result.cancelled = true;
                tracing::info!(attempted = attempted.len(), "cancelled");
                break;
            }

            // Picks up actions enqueued while this pass is running
            let Some(action) = self.next_unattempted(&attempted) else {
                break;
            };
            attempted.insert(action.id.clone());

            let outcome = self.execute_bounded(&action).await;
            let emitted = self
                .commit(QueueEvent::Executed {
                    id: action.id.clone(),
                    outcome,
                })
                .await;
            record(&mut result, &emitted);
        }

        if !attempted.is_empty() {
            self.commit(QueueEvent::Synced).await;
        }

        tracing::info!(
            succeeded = result.succeeded.len(),
            retried = result.retried_but_pending.len(),
            abandoned = result.abandoned.len(),
            cancelled = result.cancelled,
            remaining = self.pending_count(),
            "finished"
        );

        result
    }

    fn next_unattempted(&self, attempted: &HashSet<ActionId>) -> Option<QueuedAction> {
        self.lock_state()
            .next_pending(|id| attempted.contains(id))
            .cloned()
    }

    /// Run the executor, counting an overrun of the timeout as a failure
    async fn execute_bounded(&self, action: &QueuedAction) -> ExecuteOutcome {
        let timeout = self.config.execute_timeout;
        match tokio::time::timeout(timeout, self.executor.execute(action)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(id = %action.id, ?timeout, "execute timed out");
                Err(ExecuteError::Timeout(timeout))
            }
        }
    }
}

fn record(result: &mut DrainResult, emitted: &[SyncEvent]) {
    for event in emitted {
        match event {
            SyncEvent::ActionSucceeded { id } => result.succeeded.push(id.clone()),
            SyncEvent::ActionRetrying { id, .. } => result.retried_but_pending.push(id.clone()),
            SyncEvent::ActionAbandoned { id, .. } => result.abandoned.push(id.clone()),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "drain_tests.rs"]
mod tests;
