// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events emitted by queue state transitions

use crate::id::ActionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Observable changes to the queue, for logging and status presenters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncEvent {
    /// A write was buffered at the tail of the queue
    ActionQueued { id: ActionId, resource: String },

    /// A write was applied remotely and removed
    ActionSucceeded { id: ActionId },

    /// A write failed and stays queued for a later drain
    ActionRetrying {
        id: ActionId,
        attempts: u32,
        max_attempts: u32,
        reason: String,
    },

    /// A write was dropped and will never be retried
    ActionAbandoned {
        id: ActionId,
        attempts: u32,
        reason: String,
    },

    /// All pending writes were discarded on request
    QueueCleared { discarded: usize },

    /// A drain pass finished
    SyncCompleted { at: DateTime<Utc> },
}

impl SyncEvent {
    /// Stable event name for log fields and presenters
    pub fn name(&self) -> &'static str {
        match self {
            SyncEvent::ActionQueued { .. } => "action:queued",
            SyncEvent::ActionSucceeded { .. } => "action:succeeded",
            SyncEvent::ActionRetrying { .. } => "action:retrying",
            SyncEvent::ActionAbandoned { .. } => "action:abandoned",
            SyncEvent::QueueCleared { .. } => "queue:cleared",
            SyncEvent::SyncCompleted { .. } => "queue:synced",
        }
    }

    /// The action this event is about, if any
    pub fn action_id(&self) -> Option<&ActionId> {
        match self {
            SyncEvent::ActionQueued { id, .. }
            | SyncEvent::ActionSucceeded { id }
            | SyncEvent::ActionRetrying { id, .. }
            | SyncEvent::ActionAbandoned { id, .. } => Some(id),
            SyncEvent::QueueCleared { .. } | SyncEvent::SyncCompleted { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
