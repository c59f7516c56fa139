// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! Job vocabulary for the sync engine.
//!
//! This module contains the enums describing one unit of synchronization
//! work: JobKind, Direction, and JobStatus. The runtime Job itself lives
//! in fw-sync.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// What a synchronization job transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// The form schema itself (table definition).
    Form,
    /// Records collected against an installed form.
    Data,
}

impl JobKind {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Form => "form",
            JobKind::Data => "data",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "form" => Ok(JobKind::Form),
            "data" => Ok(JobKind::Data),
            _ => Err(Error::InvalidJobKind(s.to_string())),
        }
    }
}

/// Transfer direction of a synchronization job.
///
/// Only Pull is exercised by the current engine; Push and Both exist so
/// job records stay forward-compatible with an upload path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Server to local store.
    Pull,
    /// Local store to server.
    Push,
    /// Both directions in one job.
    Both,
}

impl Direction {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Pull => "pull",
            Direction::Push => "push",
            Direction::Both => "both",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pull" => Ok(Direction::Pull),
            "push" => Ok(Direction::Push),
            "both" => Ok(Direction::Both),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

/// Lifecycle state of a synchronization job.
///
/// Transitions are pending -> active -> (success | error). Success and
/// error are terminal; there is no retry transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Created but not yet started.
    Pending,
    /// Remote fetch in flight.
    Active,
    /// Completed and applied to the local store.
    Success,
    /// Failed; the job is not retried.
    Error,
}

impl JobStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Active => "active",
            JobStatus::Success => "success",
            JobStatus::Error => "error",
        }
    }

    /// Returns true if this is a terminal state (success or error).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Error)
    }

    /// Returns true while the job still counts toward sync-in-progress.
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(JobStatus::Pending),
            "active" => Ok(JobStatus::Active),
            "success" => Ok(JobStatus::Success),
            "error" => Ok(JobStatus::Error),
            _ => Err(Error::InvalidJobStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
