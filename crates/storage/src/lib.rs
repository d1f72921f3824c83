// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable local storage for the offline queue

mod file;
mod memory;
mod snapshot;
mod store;

pub use file::{default_state_dir, JsonFileStore};
pub use memory::MemoryStore;
pub use snapshot::{decode, encode, load_state, save_state};
pub use store::{KvStore, StoreError};
