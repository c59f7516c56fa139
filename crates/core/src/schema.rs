// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! Form schema model.
//!
//! A form is a table definition distributed by the server. The field
//! types are a closed set matching the input widgets the client renders;
//! each maps to a SQLite column type when the form is installed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The closed set of field types a form may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Yes/no toggle.
    Boolean,
    /// Calendar date.
    Date,
    /// Whole number.
    Integer,
    /// Floating-point number.
    Double,
    /// Single-line text.
    String,
    /// Multi-line text.
    Text,
    /// Single or multiple selection from a fixed option set.
    Options,
    /// Arbitrary JSON document.
    Json,
}

impl FieldType {
    /// Returns the string representation used in schemas and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Integer => "integer",
            FieldType::Double => "double",
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::Options => "options",
            FieldType::Json => "json",
        }
    }

    /// SQLite column type this field is stored as.
    pub fn sql_type(&self) -> &'static str {
        match self {
            FieldType::Boolean | FieldType::Integer => "INTEGER",
            FieldType::Double => "REAL",
            FieldType::Date
            | FieldType::String
            | FieldType::Text
            | FieldType::Options
            | FieldType::Json => "TEXT",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "boolean" => Ok(FieldType::Boolean),
            "date" => Ok(FieldType::Date),
            "integer" => Ok(FieldType::Integer),
            "double" => Ok(FieldType::Double),
            "string" => Ok(FieldType::String),
            "text" => Ok(FieldType::Text),
            "options" => Ok(FieldType::Options),
            "json" => Ok(FieldType::Json),
            _ => Err(Error::InvalidSchema(format!("unknown field type '{s}'"))),
        }
    }
}

/// One field of a form schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Column name in the local table.
    pub name: String,
    /// Storage and widget type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether a value is required on entry.
    #[serde(default)]
    pub required: bool,
    /// Display label; falls back to the field name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A form schema as distributed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Name of the local table this schema defines.
    pub table_name: String,
    /// Ordered field definitions.
    pub fields: Vec<FieldDef>,
}

/// True for identifiers safe to splice into SQL: ASCII letter first,
/// then letters, digits, or underscores.
fn valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FormSchema {
    /// Checks the schema is installable.
    ///
    /// Rejects empty or SQL-unsafe identifiers, schemas with no fields,
    /// duplicate field names, and fields named `id` (reserved for the
    /// row key).
    pub fn validate(&self) -> Result<()> {
        if !valid_identifier(&self.table_name) {
            return Err(Error::InvalidSchema(format!(
                "invalid table name '{}'",
                self.table_name
            )));
        }
        if self.fields.is_empty() {
            return Err(Error::InvalidSchema(format!(
                "form '{}' has no fields",
                self.table_name
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !valid_identifier(&field.name) {
                return Err(Error::InvalidSchema(format!(
                    "invalid field name '{}' in form '{}'",
                    field.name, self.table_name
                )));
            }
            if field.name == "id" {
                return Err(Error::InvalidSchema(format!(
                    "field name 'id' is reserved in form '{}'",
                    self.table_name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate field '{}' in form '{}'",
                    field.name, self.table_name
                )));
            }
        }
        Ok(())
    }

    /// Builds the CREATE TABLE statement for this schema.
    ///
    /// Callers must run `validate` first; identifiers are spliced in
    /// directly.
    pub fn create_table_sql(&self) -> String {
        let mut columns = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
        for field in &self.fields {
            let not_null = if field.required { " NOT NULL" } else { "" };
            columns.push(format!(
                "{} {}{}",
                field.name,
                field.field_type.sql_type(),
                not_null
            ));
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.table_name,
            columns.join(",\n    ")
        )
    }
}

/// What a form fetch returns: the schema plus any server-held records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPayload {
    /// Table definition to install.
    pub schema: FormSchema,
    /// Data rows, one JSON object per record.
    #[serde(default)]
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
