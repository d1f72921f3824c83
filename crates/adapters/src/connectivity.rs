// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity signal
//!
//! The host owns platform detection (browser events, OS notifications,
//! probes) and forwards what it sees into a `ConnectivityMonitor`. Consumers
//! hold a `ConnectivityWatch` and wait for transitions.

use tokio::sync::watch;

/// Network reachability as last reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

/// A change in reachability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityTransition {
    /// Offline to online
    Restored,
    /// Online to offline
    Lost,
}

/// Host-side handle that publishes connectivity changes
#[derive(Debug)]
pub struct ConnectivityMonitor {
    tx: watch::Sender<Connectivity>,
}

impl ConnectivityMonitor {
    /// Create a monitor and a first watch on it
    pub fn new(initial: Connectivity) -> (Self, ConnectivityWatch) {
        let (tx, rx) = watch::channel(initial);
        (Self { tx }, ConnectivityWatch::from_receiver(rx))
    }

    /// Publish the current connectivity; repeats of the same value are ignored
    pub fn set(&self, connectivity: Connectivity) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == connectivity {
                false
            } else {
                *current = connectivity;
                true
            }
        });
        if changed {
            tracing::info!(?connectivity, "connectivity changed");
        }
    }

    pub fn set_online(&self) {
        self.set(Connectivity::Online);
    }

    pub fn set_offline(&self) {
        self.set(Connectivity::Offline);
    }

    pub fn current(&self) -> Connectivity {
        *self.tx.borrow()
    }

    /// Another independent watch on this monitor
    pub fn watch(&self) -> ConnectivityWatch {
        ConnectivityWatch::from_receiver(self.tx.subscribe())
    }
}

/// Consumer side of the connectivity signal
#[derive(Debug, Clone)]
pub struct ConnectivityWatch {
    rx: watch::Receiver<Connectivity>,
    last: Connectivity,
}

impl ConnectivityWatch {
    fn from_receiver(rx: watch::Receiver<Connectivity>) -> Self {
        let last = *rx.borrow();
        Self { rx, last }
    }

    /// Connectivity as of the last observed transition
    pub fn current(&self) -> Connectivity {
        self.last
    }

    pub fn is_online(&self) -> bool {
        self.last == Connectivity::Online
    }

    /// Wait for the next transition; `None` once the monitor is dropped
    ///
    /// Rapid flaps between two observations collapse into at most one
    /// transition to the latest value.
    pub async fn next_transition(&mut self) -> Option<ConnectivityTransition> {
        loop {
            self.rx.changed().await.ok()?;
            let now = *self.rx.borrow_and_update();
            if now == self.last {
                continue;
            }
            self.last = now;
            return Some(match now {
                Connectivity::Online => ConnectivityTransition::Restored,
                Connectivity::Offline => ConnectivityTransition::Lost,
            });
        }
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
