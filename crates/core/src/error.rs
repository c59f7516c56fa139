// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! Error types for fw-core operations.

use thiserror::Error;

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

/// All possible errors that can occur in fw-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error{}: {message}", fmt_status(.status))]
    Transport {
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
        message: String,
    },

    #[error("form not found: {0}")]
    FormNotFound(String),

    #[error("invalid job kind: '{0}'\n  hint: valid kinds are: form, data")]
    InvalidJobKind(String),

    #[error("invalid direction: '{0}'\n  hint: valid directions are: pull, push, both")]
    InvalidDirection(String),

    #[error("invalid job status: '{0}'\n  hint: valid statuses are: pending, active, success, error")]
    InvalidJobStatus(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a transport error from an HTTP status and body/reason text.
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Error::Transport {
            status,
            message: message.into(),
        }
    }
}

/// A specialized Result type for fw-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
