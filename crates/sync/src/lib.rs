// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! fw-sync: Background synchronization engine for fieldwork.
//!
//! Pulls form schemas and data from the remote catalog into the local
//! table registry. One [`SyncEngine::synchronize`] call resolves the
//! available form list, schedules one pull job per selected form, and
//! runs the jobs as independent tasks; a shared [`SyncState`] publishes
//! whether any job is still open.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod events;
pub mod job;
pub mod queue;
pub mod state;

pub use catalog::{CatalogService, HttpCatalog};
pub use config::SyncConfig;
pub use engine::{StatusPoller, SyncEngine};
pub use events::SyncEvent;
pub use job::Job;
pub use queue::JobQueue;
pub use state::SyncState;
