// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The offline sync queue

use crate::SyncError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use syncq_adapters::{ErrorReport, ErrorReporter, RemoteWriteExecutor};
use syncq_core::{
    ActionId, ActionKind, Clock, ConfigError, IdGen, QueueEvent, QueueState, QueuedAction,
    SyncConfig, SyncEvent, Timestamp,
};
use syncq_storage::{default_state_dir, load_state, save_state, JsonFileStore, KvStore};
use tokio::sync::{broadcast, Notify};

/// Buffered events per subscriber before the slowest one starts lagging
const EVENT_CAPACITY: usize = 256;

/// Open the file store configured by `state_dir`, or the platform default
pub fn file_store(config: &SyncConfig) -> Result<JsonFileStore, SyncError> {
    let dir = match &config.state_dir {
        Some(dir) => dir.clone(),
        None => default_state_dir().ok_or_else(|| {
            ConfigError::Invalid("state_dir unset and no platform data directory".to_string())
        })?,
    };
    Ok(JsonFileStore::open(dir)?)
}

/// Collaborators the queue is constructed with
pub struct QueueDeps<E, S, R> {
    pub executor: E,
    pub store: S,
    pub reporter: R,
}

/// Buffers writes and replays them against the backend
///
/// All state changes go through `QueueState::transition` under one lock and
/// are persisted before the lock is released, so the stored record always
/// reflects a prefix of the in-memory history.
pub struct OfflineSyncQueue<E, S, R, C: Clock, I: IdGen> {
    pub(crate) executor: E,
    store: S,
    reporter: R,
    clock: C,
    id_gen: I,
    pub(crate) config: SyncConfig,
    state: Mutex<QueueState>,
    draining: AtomicBool,
    drain_done: Notify,
    events: broadcast::Sender<SyncEvent>,
}

impl<E, S, R, C, I> OfflineSyncQueue<E, S, R, C, I>
where
    E: RemoteWriteExecutor,
    S: KvStore,
    R: ErrorReporter,
    C: Clock,
    I: IdGen,
{
    /// Load the queue from the store
    ///
    /// A missing record is an empty queue. An unreadable or invalid record is
    /// an error so pending writes are never silently discarded.
    pub fn open(
        deps: QueueDeps<E, S, R>,
        clock: C,
        id_gen: I,
        config: SyncConfig,
    ) -> Result<Self, SyncError> {
        config.validate()?;
        let state = load_state(&deps.store, &config.storage_key)?;

        tracing::info!(
            key = %config.storage_key,
            pending = state.len(),
            last_sync_at = ?state.last_sync_at,
            "queue loaded"
        );

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            executor: deps.executor,
            store: deps.store,
            reporter: deps.reporter,
            clock,
            id_gen,
            config,
            state: Mutex::new(state),
            draining: AtomicBool::new(false),
            drain_done: Notify::new(),
            events,
        })
    }

    /// Buffer a write at the tail of the queue and persist it
    ///
    /// Does not start a drain. `max_attempts` falls back to the configured
    /// default; zero is raised to one.
    pub async fn enqueue(
        &self,
        kind: ActionKind,
        resource: impl Into<String>,
        payload: serde_json::Value,
        max_attempts: Option<u32>,
    ) -> ActionId {
        let resource = resource.into();
        let max_attempts = max_attempts.unwrap_or(self.config.default_max_attempts);

        let (_, id) = self
            .commit_with(|state| {
                let id = self.fresh_id(state);
                let action = QueuedAction::new(
                    id.clone(),
                    kind,
                    resource,
                    payload,
                    self.clock.now(),
                )
                .with_max_attempts(max_attempts);
                (QueueEvent::Enqueue { action }, id)
            })
            .await;
        id
    }

    /// Discard every pending action and persist the empty queue
    pub async fn clear(&self) -> usize {
        let emitted = self.commit(QueueEvent::Clear).await;
        emitted
            .iter()
            .find_map(|e| match e {
                SyncEvent::QueueCleared { discarded } => Some(*discarded),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Number of actions waiting to be applied
    pub fn pending_count(&self) -> usize {
        self.lock_state().len()
    }

    /// Copy of the pending actions, in queue order
    pub fn snapshot(&self) -> Vec<QueuedAction> {
        self.lock_state().actions.clone()
    }

    /// Completion time of the last drain that attempted anything
    pub fn last_sync_at(&self) -> Option<Timestamp> {
        self.lock_state().last_sync_at
    }

    /// Whether a drain pass currently holds the queue
    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Acquire)
    }

    /// Wait until no drain pass is running
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.drain_done.notified();
            tokio::pin!(notified);
            // Register before checking so a pass ending in between still wakes us
            notified.as_mut().enable();
            if !self.is_draining() {
                return;
            }
            notified.await;
        }
    }

    /// Claim the single drain slot, or `None` while another pass holds it
    pub(crate) fn try_claim_drain(&self) -> Option<DrainGuard<'_>> {
        self.draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(DrainGuard {
            draining: &self.draining,
            done: &self.drain_done,
        })
    }

    /// Receive every state change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Apply a transition, persist, and publish its events
    pub(crate) async fn commit(&self, event: QueueEvent) -> Vec<SyncEvent> {
        self.commit_with(|_| (event, ())).await.0
    }

    /// Like `commit`, building the event from the current state under the lock
    async fn commit_with<T>(
        &self,
        build: impl FnOnce(&QueueState) -> (QueueEvent, T),
    ) -> (Vec<SyncEvent>, T) {
        let (emitted, extra, persisted) = {
            let mut state = self.lock_state();
            let (event, extra) = build(&state);
            let (next, emitted) = state.transition(event, &self.clock);
            *state = next;
            let persisted = save_state(&self.store, &self.config.storage_key, &state);
            // Published under the lock so subscribers see changes in commit order
            for event in &emitted {
                self.publish(event);
            }
            (emitted, extra, persisted)
        };

        if let Err(e) = persisted {
            tracing::warn!(error = %e, "persist failed, change kept in memory only");
            self.reporter
                .report(ErrorReport::new("persist", e.to_string()))
                .await;
        }

        (emitted, extra)
    }

    fn publish(&self, event: &SyncEvent) {
        tracing::debug!(
            event = event.name(),
            id = event.action_id().map(ActionId::as_str),
            "queue event"
        );
        // No subscribers is fine
        let _ = self.events.send(event.clone());
    }

    /// Draw ids until one is not already queued
    fn fresh_id(&self, state: &QueueState) -> ActionId {
        loop {
            let id = self.id_gen.next();
            if !state.contains(&id) {
                return id;
            }
            tracing::debug!(%id, "generated id already queued, drawing another");
        }
    }

    pub(crate) fn lock_state(&self) -> std::sync::MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Holds the drain slot; releasing it wakes `wait_idle` callers
pub(crate) struct DrainGuard<'a> {
    draining: &'a AtomicBool,
    done: &'a Notify,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.draining.store(false, Ordering::Release);
        self.done.notify_waiters();
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
