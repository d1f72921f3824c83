// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake reporter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ErrorReport, ErrorReporter};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Fake reporter for testing
#[derive(Clone, Default)]
pub struct FakeReporter {
    reports: Arc<Mutex<Vec<ErrorReport>>>,
}

impl FakeReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded reports
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ErrorReporter for FakeReporter {
    async fn report(&self, report: ErrorReport) {
        self.reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(report);
    }
}
