// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{ErrorReport, ErrorReporter};
use async_trait::async_trait;

/// Reporter that only writes to the log
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ErrorReporter for LogReporter {
    async fn report(&self, report: ErrorReport) {
        tracing::error!(operation = %report.operation, error = %report.message, "reported");
    }
}
