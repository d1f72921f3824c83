// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake executor for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::RemoteWriteExecutor;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use syncq_core::{ActionId, ActionKind, ExecuteError, ExecuteOutcome, QueuedAction};

type Hook = Arc<dyn Fn(&QueuedAction) + Send + Sync>;

/// Recorded execute call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorCall {
    pub id: ActionId,
    pub kind: ActionKind,
    pub resource: String,
    /// Attempts recorded on the action before this call
    pub attempts: u32,
}

#[derive(Default)]
struct Script {
    /// One-shot outcomes, keyed by action id or resource
    queued: HashMap<String, VecDeque<ExecuteOutcome>>,
    /// Failures returned on every call, keyed by action id or resource
    always: HashMap<String, ExecuteError>,
}

impl Script {
    fn outcome_for(&mut self, action: &QueuedAction) -> ExecuteOutcome {
        for key in [action.id.as_str(), action.resource.as_str()] {
            if let Some(outcome) = self.queued.get_mut(key).and_then(VecDeque::pop_front) {
                return outcome;
            }
        }
        for key in [action.id.as_str(), action.resource.as_str()] {
            if let Some(error) = self.always.get(key) {
                return Err(error.clone());
            }
        }
        Ok(())
    }
}

/// Fake executor for testing
///
/// Succeeds unless scripted otherwise. Targets are matched against the
/// action id first, then its resource.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    calls: Arc<Mutex<Vec<ExecutorCall>>>,
    script: Arc<Mutex<Script>>,
    delay: Arc<Mutex<Option<Duration>>>,
    hook: Arc<Mutex<Option<Hook>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `outcome` for the next call matching `target`
    pub fn push_outcome(&self, target: &str, outcome: ExecuteOutcome) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .queued
            .entry(target.to_string())
            .or_default()
            .push_back(outcome);
    }

    /// Fail every call matching `target`
    pub fn fail_always(&self, target: &str, error: ExecuteError) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .always
            .insert(target.to_string(), error);
    }

    /// Stop failing calls matching `target`
    pub fn recover(&self, target: &str) {
        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        script.always.remove(target);
        script.queued.remove(target);
    }

    /// Sleep this long inside every call
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap_or_else(|e| e.into_inner()) = Some(delay);
    }

    /// Run `hook` at the start of every call
    pub fn on_execute(&self, hook: impl Fn(&QueuedAction) + Send + Sync + 'static) {
        *self.hook.lock().unwrap_or_else(|e| e.into_inner()) = Some(Arc::new(hook));
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Ids in the order they were executed
    pub fn executed_ids(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|c| c.id.as_str().to_string())
            .collect()
    }

    /// Highest number of calls that were ever running at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteWriteExecutor for FakeExecutor {
    async fn execute(&self, action: &QueuedAction) -> ExecuteOutcome {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ExecutorCall {
                id: action.id.clone(),
                kind: action.kind,
                resource: action.resource.clone(),
                attempts: action.attempts,
            });

        let hook = self.hook.lock().unwrap_or_else(|e| e.into_inner()).clone();
        if let Some(hook) = hook {
            hook(action);
        }

        let delay = *self.delay.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .outcome_for(action);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
