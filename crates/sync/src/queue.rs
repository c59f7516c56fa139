// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! The job queue and its status aggregation.
//!
//! An ordered collection of jobs, mutated only by append and by the
//! combined compact-and-publish pass of [`JobQueue::refresh_status`].
//! Passes are serialized through a dedicated mutex: overlapping callers
//! wait their turn instead of interleaving over the queue.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::job::Job;
use crate::state::SyncState;
use fw_core::JobStatus;

/// Ordered collection of sync jobs plus the shared in-progress flag.
pub struct JobQueue {
    jobs: Mutex<Vec<Arc<Job>>>,
    /// Serializes refresh passes; at most one compaction runs at a time.
    refresh: Mutex<()>,
    state: SyncState,
}

impl JobQueue {
    /// Creates an empty queue publishing to the given state container.
    pub fn new(state: SyncState) -> Self {
        JobQueue {
            jobs: Mutex::new(Vec::new()),
            refresh: Mutex::new(()),
            state,
        }
    }

    /// Appends a job.
    pub async fn push(&self, job: Arc<Job>) {
        self.jobs.lock().await.push(job);
    }

    /// Number of jobs currently held (terminal ones included until the
    /// next refresh).
    pub async fn len(&self) -> usize {
        self.jobs.lock().await.len()
    }

    /// True if no jobs are held.
    pub async fn is_empty(&self) -> bool {
        self.jobs.lock().await.is_empty()
    }

    /// Snapshot of all held jobs, in order.
    pub async fn snapshot(&self) -> Vec<Arc<Job>> {
        self.jobs.lock().await.clone()
    }

    /// The jobs currently pending, in order.
    pub async fn pending_jobs(&self) -> Vec<Arc<Job>> {
        self.jobs
            .lock()
            .await
            .iter()
            .filter(|job| job.status() == JobStatus::Pending)
            .cloned()
            .collect()
    }

    /// Drops every held job (logout/restart).
    pub async fn clear(&self) {
        self.jobs.lock().await.clear();
    }

    /// One combined compaction and status-publication pass.
    ///
    /// Removes jobs whose status is terminal, then publishes whether any
    /// open job remains. Cannot fail.
    pub async fn refresh_status(&self) {
        let _pass = self.refresh.lock().await;
        let in_progress = {
            let mut jobs = self.jobs.lock().await;
            jobs.retain(|job| job.status().is_open());
            !jobs.is_empty()
        };
        self.state.set(in_progress);
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
