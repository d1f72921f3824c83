// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcomes of executing and draining queued actions

use crate::id::ActionId;
use std::time::Duration;
use thiserror::Error;

/// Why a remote write did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    /// Network error, 5xx, or anything else worth retrying
    #[error("transient failure: {0}")]
    Transient(String),
    /// The backend will never accept this write (e.g. validation error)
    #[error("permanent failure: {0}")]
    Permanent(String),
    /// The executor did not answer within the configured timeout
    #[error("timed out after {}", humantime::format_duration(*.0))]
    Timeout(Duration),
}

impl ExecuteError {
    pub fn transient(reason: impl Into<String>) -> Self {
        ExecuteError::Transient(reason.into())
    }

    pub fn permanent(reason: impl Into<String>) -> Self {
        ExecuteError::Permanent(reason.into())
    }

    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ExecuteError::Permanent(_))
    }
}

/// Result of one attempt at a queued action
pub type ExecuteOutcome = Result<(), ExecuteError>;

/// Per-action accounting for one drain pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainResult {
    /// Executed and removed from the queue
    pub succeeded: Vec<ActionId>,
    /// Failed but still have attempts left; retried on a later drain
    pub retried_but_pending: Vec<ActionId>,
    /// Removed after a permanent failure or after reaching the attempt cap
    pub abandoned: Vec<ActionId>,
    /// The pass stopped early because it was cancelled
    pub cancelled: bool,
}

impl DrainResult {
    /// Number of actions attempted during the pass
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.retried_but_pending.len() + self.abandoned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempted() == 0
    }
}
