// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! syncq-core: data model and state machine for the offline write queue
//!
//! This crate provides:
//! - Buffered write intents (`QueuedAction`) and their identifiers
//! - The pure queue state machine (`QueueState::transition`)
//! - Execution outcomes and drain accounting
//! - Clock and id abstractions for deterministic tests
//! - TOML configuration

pub mod action;
pub mod clock;
pub mod config;
pub mod event;
pub mod id;
pub mod outcome;
pub mod queue;

pub use action::{ActionKind, QueuedAction, DEFAULT_MAX_ATTEMPTS};
pub use clock::{Clock, FakeClock, SystemClock, Timestamp};
pub use config::{ConfigError, LoggingConfig, SyncConfig, DEFAULT_STORAGE_KEY};
pub use event::SyncEvent;
pub use id::{ActionId, IdGen, SequentialIdGen, UuidIdGen};
pub use outcome::{DrainResult, ExecuteError, ExecuteOutcome};
pub use queue::{QueueEvent, QueueState};
