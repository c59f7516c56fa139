// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! Form catalog types and the form-list merge.
//!
//! The server publishes a catalog of available forms; the client merges
//! that catalog with its local table registry and any previously shown
//! list so user download choices survive a refresh.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque server-side reference used to build the remote request.
///
/// Wire keys are the compact `c`/`f`/`v` triple the server emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRef {
    /// Server controller name.
    #[serde(rename = "c")]
    pub controller: String,
    /// Server function name.
    #[serde(rename = "f")]
    pub function: String,
    /// Extra request parameters, passed through as query pairs.
    #[serde(rename = "v", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl FormRef {
    /// Creates a reference with no extra parameters.
    pub fn new(controller: impl Into<String>, function: impl Into<String>) -> Self {
        FormRef {
            controller: controller.into(),
            function: function.into(),
            params: BTreeMap::new(),
        }
    }

    /// Adds a request parameter (builder style).
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// One record of the server's form catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Human-readable form name.
    #[serde(rename = "n")]
    pub name: String,
    /// Name of the local table the form populates.
    #[serde(rename = "t")]
    pub table_name: String,
    /// Reference for fetching the form from the server.
    #[serde(rename = "r")]
    pub reference: FormRef,
}

/// One entry of the client-side form list shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormListEntry {
    /// Human-readable form name.
    pub name: String,
    /// Name of the local table the form populates.
    pub table_name: String,
    /// Reference for fetching the form from the server.
    pub reference: FormRef,
    /// True if a local table with this name already exists.
    pub installed: bool,
    /// Whether the user wants this form fetched.
    pub download: bool,
}

/// Merges a server catalog into a client form list.
///
/// For each catalog entry, `installed` is true iff its table name appears
/// in `local_tables`. The `download` flag is carried forward from a prior
/// entry with the same table name, so user choices persist across
/// refreshes within a session; entries without a prior match default to
/// `download = true`. Output order follows the catalog.
pub fn update_form_list(
    prior: &[FormListEntry],
    local_tables: &[String],
    catalog: Vec<CatalogEntry>,
) -> Vec<FormListEntry> {
    catalog
        .into_iter()
        .map(|entry| {
            let download = prior
                .iter()
                .find(|p| p.table_name == entry.table_name)
                .map(|p| p.download)
                .unwrap_or(true);
            let installed = local_tables.iter().any(|t| *t == entry.table_name);
            FormListEntry {
                name: entry.name,
                table_name: entry.table_name,
                reference: entry.reference,
                installed,
                download,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
