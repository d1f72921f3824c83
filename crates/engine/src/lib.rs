// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Offline sync queue engine
//!
//! Buffers writes while the client is offline, persists them after every
//! change, and replays them in order once connectivity returns.

mod drain;
mod error;
mod logging;
mod queue;
mod sync_loop;

#[cfg(test)]
mod test_helpers;

pub use error::SyncError;
pub use logging::init_logging;
pub use queue::{file_store, OfflineSyncQueue, QueueDeps};
pub use sync_loop::SyncLoop;
pub use tokio_util::sync::CancellationToken;
