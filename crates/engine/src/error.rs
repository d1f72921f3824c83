// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the sync engine

use syncq_core::ConfigError;
use syncq_storage::StoreError;
use thiserror::Error;

/// Errors surfaced to the host application
///
/// Execution failures are never errors here; they are accounted for in
/// `DrainResult`.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("a drain is already in progress")]
    DrainInProgress,
    #[error("logging setup failed: {0}")]
    Logging(String),
}
