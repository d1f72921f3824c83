// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Buffered write intents

use crate::id::ActionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attempts allowed when the caller does not pick a cap
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// The kind of write a queued action performs against its resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Create,
    Update,
    Delete,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Create => "Create",
            ActionKind::Update => "Update",
            ActionKind::Delete => "Delete",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One buffered write intent
///
/// `payload` is owned by the caller and never inspected by the queue.
/// `enqueued_at` and `max_attempts` are fixed at creation; only `attempts`
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedAction {
    pub id: ActionId,
    pub kind: ActionKind,
    pub resource: String,
    pub payload: serde_json::Value,
    pub enqueued_at: DateTime<Utc>,
    pub attempts: u32,
    pub max_attempts: u32,
}

impl QueuedAction {
    /// Create a fresh action with no attempts and the default cap
    pub fn new(
        id: ActionId,
        kind: ActionKind,
        resource: impl Into<String>,
        payload: serde_json::Value,
        enqueued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            resource: resource.into(),
            payload,
            enqueued_at,
            attempts: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set max attempts (at least one attempt is always allowed)
    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..self
        }
    }

    /// Copy of this action with one more attempt recorded
    pub fn with_incremented_attempts(&self) -> Self {
        Self {
            attempts: (self.attempts + 1).min(self.max_attempts),
            ..self.clone()
        }
    }

    /// True once no further attempt is allowed
    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
