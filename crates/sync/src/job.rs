// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! One unit of synchronization work.
//!
//! A job is created pending, claimed exactly once via [`Job::begin`],
//! and finished into success or error. Terminal jobs are dropped from
//! the queue on the next status refresh; there is no retry.

use chrono::{DateTime, Utc};
use std::sync::Mutex;

use fw_core::{Direction, FormRef, JobKind, JobStatus, Result};

#[derive(Debug)]
struct JobState {
    status: JobStatus,
    error: Option<String>,
}

/// A single synchronization job.
#[derive(Debug)]
pub struct Job {
    /// What is being synchronized.
    pub kind: JobKind,
    /// Transfer direction (only pull is scheduled today).
    pub direction: Direction,
    /// Local table the job populates.
    pub target: String,
    /// Server reference used to build the remote request.
    pub reference: FormRef,
    /// When the job was scheduled.
    pub created_at: DateTime<Utc>,
    state: Mutex<JobState>,
}

impl Job {
    /// Creates a pending pull job for a form.
    pub fn pull_form(target: impl Into<String>, reference: FormRef) -> Self {
        Job::new(JobKind::Form, Direction::Pull, target, reference)
    }

    /// Creates a pending job.
    pub fn new(
        kind: JobKind,
        direction: Direction,
        target: impl Into<String>,
        reference: FormRef,
    ) -> Self {
        Job {
            kind,
            direction,
            target: target.into(),
            reference,
            created_at: Utc::now(),
            state: Mutex::new(JobState {
                status: JobStatus::Pending,
                error: None,
            }),
        }
    }

    // A poisoned lock only means some holder panicked mid-read; the
    // state itself is always a valid JobState.
    fn state(&self) -> std::sync::MutexGuard<'_, JobState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current lifecycle status.
    pub fn status(&self) -> JobStatus {
        self.state().status
    }

    /// Error detail of a failed job, if any.
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// Claims the job for execution.
    ///
    /// Returns true and transitions pending -> active exactly once;
    /// any later call returns false, so an already active or finished
    /// job is never run twice.
    pub(crate) fn begin(&self) -> bool {
        let mut state = self.state();
        if state.status != JobStatus::Pending {
            return false;
        }
        state.status = JobStatus::Active;
        true
    }

    /// Records the outcome of an active job.
    pub(crate) fn finish(&self, outcome: &Result<()>) {
        let mut state = self.state();
        match outcome {
            Ok(()) => {
                state.status = JobStatus::Success;
            }
            Err(err) => {
                state.status = JobStatus::Error;
                state.error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
