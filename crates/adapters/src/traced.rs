// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::executor::RemoteWriteExecutor;
use async_trait::async_trait;
use syncq_core::{ExecuteOutcome, QueuedAction};
use tracing::Instrument;

/// Wrapper that adds tracing to any RemoteWriteExecutor
#[derive(Clone)]
pub struct TracedExecutor<E> {
    inner: E,
}

impl<E> TracedExecutor<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E: RemoteWriteExecutor> RemoteWriteExecutor for TracedExecutor<E> {
    async fn execute(&self, action: &QueuedAction) -> ExecuteOutcome {
        let span = tracing::info_span!(
            "executor.execute",
            id = %action.id,
            kind = %action.kind,
            resource = %action.resource,
        );

        async {
            tracing::info!(
                attempt = action.attempts + 1,
                max_attempts = action.max_attempts,
                "starting"
            );

            let start = std::time::Instant::now();
            let result = self.inner.execute(action).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "applied"),
                Err(e) if e.is_retryable() => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "failed, retryable"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "failed permanently"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
