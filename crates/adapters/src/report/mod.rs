// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Side channel for non-fatal errors
//!
//! Failures that must not interrupt the user's current action (losing
//! durability, mostly) are handed to an `ErrorReporter` instead of being
//! returned to the caller.

mod logged;

pub use logged::LogReporter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeReporter;

use async_trait::async_trait;

/// A non-fatal error raised while operating the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// What the queue was doing, e.g. "persist"
    pub operation: String,
    pub message: String,
}

impl ErrorReport {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Receives non-fatal errors for presentation or telemetry
#[async_trait]
pub trait ErrorReporter: Clone + Send + Sync + 'static {
    async fn report(&self, report: ErrorReport);
}
