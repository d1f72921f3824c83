// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted queue record
//!
//! The whole queue is stored as a single JSON record under one key:
//!
//! ```json
//! { "actions": [ { "id": "...", "kind": "Create", ... } ], "lastSyncAt": null }
//! ```

use crate::store::{KvStore, StoreError};
use syncq_core::QueueState;

/// Serialize queue state to its persisted form
pub fn encode(state: &QueueState) -> Result<String, StoreError> {
    Ok(serde_json::to_string(state)?)
}

/// Parse and validate a persisted record
pub fn decode(record: &str) -> Result<QueueState, StoreError> {
    let state: QueueState = serde_json::from_str(record)?;
    validate(&state)?;
    Ok(state)
}

/// Load queue state; an absent key is an empty queue
pub fn load_state(store: &impl KvStore, key: &str) -> Result<QueueState, StoreError> {
    match store.get(key)? {
        Some(record) => decode(&record),
        None => Ok(QueueState::new()),
    }
}

/// Persist queue state under the given key
pub fn save_state(store: &impl KvStore, key: &str, state: &QueueState) -> Result<(), StoreError> {
    let record = encode(state)?;
    store.put(key, &record)
}

fn validate(state: &QueueState) -> Result<(), StoreError> {
    let mut seen = std::collections::HashSet::new();
    for action in &state.actions {
        if action.max_attempts == 0 {
            return Err(StoreError::InvalidRecord(format!(
                "action {} has maxAttempts 0",
                action.id
            )));
        }
        if action.attempts >= action.max_attempts {
            return Err(StoreError::InvalidRecord(format!(
                "action {} has {} of {} attempts and should have been abandoned",
                action.id, action.attempts, action.max_attempts
            )));
        }
        if !seen.insert(&action.id) {
            return Err(StoreError::InvalidRecord(format!(
                "duplicate action id {}",
                action.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
