// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! Engine notifications for UI collaborators.
//!
//! Events are fanned out over a broadcast channel; subscribers that lag
//! or never subscribe at all do not block the engine.

use fw_core::JobStatus;

/// One engine notification.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A synchronize call began scheduling or running work.
    Started,
    /// The catalog fetch failed; nothing was scheduled.
    CatalogError {
        /// HTTP status, when the server answered.
        status: Option<u16>,
        /// Human-readable error description.
        message: String,
    },
    /// A job reached a terminal status.
    JobFinished {
        /// Local table the job targeted.
        target: String,
        /// Success or error.
        status: JobStatus,
    },
    /// The queue drained; sync is no longer in progress.
    Idle,
}

impl SyncEvent {
    /// Creates a CatalogError event from an engine error.
    pub(crate) fn catalog_error(err: &fw_core::Error) -> Self {
        match err {
            fw_core::Error::Transport { status, message } => SyncEvent::CatalogError {
                status: *status,
                message: message.clone(),
            },
            other => SyncEvent::CatalogError {
                status: None,
                message: other.to_string(),
            },
        }
    }
}
