// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! Shared sync-in-progress state.
//!
//! An explicit container replacing the ambient "sync in progress" global
//! of earlier designs: UI code reads or subscribes, only the engine
//! writes. Created at application start, reset on logout or restart.

use std::sync::Arc;
use tokio::sync::watch;

/// Process-wide flag: true while any sync job is pending or active.
#[derive(Clone)]
pub struct SyncState {
    tx: Arc<watch::Sender<bool>>,
}

impl SyncState {
    /// Creates the state container with the flag cleared.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        SyncState { tx: Arc::new(tx) }
    }

    /// Current value of the flag.
    pub fn in_progress(&self) -> bool {
        *self.tx.borrow()
    }

    /// Subscribes to flag changes. Publishing an unchanged value is not
    /// an observable event.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Clears the flag (logout/restart).
    pub fn reset(&self) {
        self.set(false);
    }

    /// Publishes a new value, notifying subscribers only on change.
    pub(crate) fn set(&self, in_progress: bool) {
        self.tx.send_if_modified(|current| {
            if *current != in_progress {
                *current = in_progress;
                true
            } else {
                false
            }
        });
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
