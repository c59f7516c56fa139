// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! fw-core: Shared library for the fieldwork mobile sync client
//!
//! This crate provides the core data structures, the local SQLite table
//! registry, and the form-list merge logic used by the fw-sync engine.

pub mod error;
pub mod form;
pub mod job;
pub mod registry;
pub mod schema;

pub use error::{Error, Result};
pub use form::{update_form_list, CatalogEntry, FormListEntry, FormRef};
pub use job::{Direction, JobKind, JobStatus};
pub use registry::TableRegistry;
pub use schema::{FieldDef, FieldType, FormPayload, FormSchema};
