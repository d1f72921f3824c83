// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity-driven draining

use crate::{OfflineSyncQueue, SyncError};
use std::sync::Arc;
use syncq_adapters::{ConnectivityTransition, ConnectivityWatch, ErrorReporter, RemoteWriteExecutor};
use syncq_core::{Clock, DrainResult, IdGen};
use syncq_storage::KvStore;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A drain pass running on its own task
struct RunningDrain {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl RunningDrain {
    fn is_done(&self) -> bool {
        self.cancel.is_cancelled() || self.handle.is_finished()
    }

    async fn finish(self) {
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "drain task failed");
        }
    }
}

/// Drains the queue whenever connectivity comes back
///
/// - Starting online with pending actions drains immediately.
/// - `Restored` starts a drain, first waiting for a cancelled one to wind down.
/// - `Lost` cancels the running drain; the action in flight still completes.
/// - A drain rejected because another pass is running (a manual `drain`) is
///   retried once that pass ends.
///
/// Every finished pass is sent on `results`. The loop returns once the
/// connectivity monitor is dropped and the last drain has finished.
pub struct SyncLoop<E, S, R, C: Clock, I: IdGen> {
    queue: Arc<OfflineSyncQueue<E, S, R, C, I>>,
    watch: ConnectivityWatch,
    results: mpsc::Sender<DrainResult>,
}

impl<E, S, R, C, I> SyncLoop<E, S, R, C, I>
where
    E: RemoteWriteExecutor,
    S: KvStore,
    R: ErrorReporter,
    C: Clock,
    I: IdGen,
{
    pub fn new(
        queue: Arc<OfflineSyncQueue<E, S, R, C, I>>,
        watch: ConnectivityWatch,
        results: mpsc::Sender<DrainResult>,
    ) -> Self {
        Self {
            queue,
            watch,
            results,
        }
    }

    /// Run the loop on a new task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        let mut current: Option<RunningDrain> = None;

        if self.watch.is_online() && self.queue.pending_count() > 0 {
            tracing::info!("online at start with pending actions");
            current = Some(self.start_drain());
        }

        while let Some(transition) = self.watch.next_transition().await {
            match transition {
                ConnectivityTransition::Restored => {
                    if let Some(running) = current.take() {
                        if !running.is_done() {
                            current = Some(running);
                            continue;
                        }
                        running.finish().await;
                    }
                    tracing::info!("connectivity restored, draining");
                    current = Some(self.start_drain());
                }
                ConnectivityTransition::Lost => {
                    if let Some(running) = &current {
                        tracing::info!("connectivity lost, cancelling drain");
                        running.cancel.cancel();
                    }
                }
            }
        }

        tracing::debug!("connectivity monitor closed");
        if let Some(running) = current {
            running.finish().await;
        }
    }

    fn start_drain(&self) -> RunningDrain {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let queue = Arc::clone(&self.queue);
        let results = self.results.clone();

        let handle = tokio::spawn(async move {
            let attempt = match queue.drain_until(&token).await {
                Err(SyncError::DrainInProgress) => {
                    // Another pass may have walked past actions this trigger is for
                    tracing::debug!("drain already running, retrying once it ends");
                    tokio::select! {
                        _ = queue.wait_idle() => {}
                        _ = token.cancelled() => {}
                    }
                    queue.drain_until(&token).await
                }
                other => other,
            };
            match attempt {
                Ok(result) => {
                    if results.send(result).await.is_err() {
                        tracing::debug!("drain result receiver dropped");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "drain not started"),
            }
        });

        RunningDrain { cancel, handle }
    }
}

#[cfg(test)]
#[path = "sync_loop_tests.rs"]
mod tests;
