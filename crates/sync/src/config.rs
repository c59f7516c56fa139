// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! Sync engine configuration.
//!
//! Loaded from a TOML file or built in code; all knobs have defaults so
//! a bare `server_url` is a complete configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use fw_core::{Error, Result};

/// Configuration for the sync engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the remote server (e.g. `https://server.example.org/fieldwork`).
    pub server_url: String,
    /// Interval between periodic status-aggregation passes in
    /// milliseconds (default: 250).
    #[serde(default = "default_status_poll_interval_ms")]
    pub status_poll_interval_ms: u64,
    /// Max time to wait for the initial connection in seconds (default: 5).
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_status_poll_interval_ms() -> u64 {
    250
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl SyncConfig {
    /// Creates a configuration with defaults for the given server.
    pub fn new(server_url: impl Into<String>) -> Self {
        SyncConfig {
            server_url: server_url.into(),
            status_poll_interval_ms: default_status_poll_interval_ms(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
