// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Offline queue state and its transitions
//!
//! The queue is an ordered list of buffered writes plus the time of the last
//! completed drain. Transitions are pure: they return the next state together
//! with the events describing what changed. Actions keep their relative order
//! for their whole life; a failed action that still has attempts left stays in
//! place rather than moving to the tail.

use crate::action::QueuedAction;
use crate::clock::Clock;
use crate::event::SyncEvent;
use crate::id::ActionId;
use crate::outcome::ExecuteOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inputs that change queue state
#[derive(Debug, Clone)]
pub enum QueueEvent {
    /// Append a new action to the tail
    Enqueue { action: QueuedAction },
    /// Record the outcome of one attempt at an action
    Executed { id: ActionId, outcome: ExecuteOutcome },
    /// A drain pass completed
    Synced,
    /// Discard every pending action
    Clear,
}

/// The full queue, in enqueue order
///
/// This is also the persisted record: it serializes to
/// `{"actions": [...], "lastSyncAt": "..."|null}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueState {
    pub actions: Vec<QueuedAction>,
    #[serde(default)]
    pub last_sync_at: Option<DateTime<Utc>>,
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition function - returns new state and emitted events
    pub fn transition(&self, event: QueueEvent, clock: &impl Clock) -> (QueueState, Vec<SyncEvent>) {
        match event {
            QueueEvent::Enqueue { action } => {
                let emitted = SyncEvent::ActionQueued {
                    id: action.id.clone(),
                    resource: action.resource.clone(),
                };
                let mut actions = self.actions.clone();
                actions.push(action);
                (
                    QueueState {
                        actions,
                        ..self.clone()
                    },
                    vec![emitted],
                )
            }

            QueueEvent::Executed { id, outcome } => {
                let Some(index) = self.position(&id) else {
                    // Discarded while its attempt was in flight
                    return (self.clone(), vec![]);
                };

                let mut actions = self.actions.clone();
                let emitted = match outcome {
                    Ok(()) => {
                        actions.remove(index);
                        SyncEvent::ActionSucceeded { id }
                    }
                    Err(error) => {
                        let attempted = actions[index].with_incremented_attempts();
                        if error.is_retryable() && !attempted.is_exhausted() {
                            let emitted = SyncEvent::ActionRetrying {
                                id,
                                attempts: attempted.attempts,
                                max_attempts: attempted.max_attempts,
                                reason: error.to_string(),
                            };
                            actions[index] = attempted;
                            emitted
                        } else {
                            actions.remove(index);
                            SyncEvent::ActionAbandoned {
                                id,
                                attempts: attempted.attempts,
                                reason: error.to_string(),
                            }
                        }
                    }
                };

                (
                    QueueState {
                        actions,
                        ..self.clone()
                    },
                    vec![emitted],
                )
            }

            QueueEvent::Synced => {
                let at = clock.now();
                (
                    QueueState {
                        last_sync_at: Some(at),
                        ..self.clone()
                    },
                    vec![SyncEvent::SyncCompleted { at }],
                )
            }

            QueueEvent::Clear => {
                let discarded = self.actions.len();
                (
                    QueueState {
                        actions: Vec::new(),
                        ..self.clone()
                    },
                    vec![SyncEvent::QueueCleared { discarded }],
                )
            }
        }
    }

    /// Number of pending actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn contains(&self, id: &ActionId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &ActionId) -> Option<&QueuedAction> {
        self.actions.iter().find(|a| &a.id == id)
    }

    /// First action, in queue order, that `skip` does not exclude
    pub fn next_pending(&self, skip: impl Fn(&ActionId) -> bool) -> Option<&QueuedAction> {
        self.actions.iter().find(|a| !skip(&a.id))
    }

    fn position(&self, id: &ActionId) -> Option<usize> {
        self.actions.iter().position(|a| &a.id == id)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
