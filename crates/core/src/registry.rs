// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! SQLite-backed local table registry.
//!
//! The [`TableRegistry`] owns the client's local store: it lists which
//! form tables exist, installs pulled form schemas, and inserts pulled
//! data rows. Installed schemas are kept in a `fw_forms` metadata table
//! so typed inserts stay possible after restart.

use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::{FieldType, FormSchema};

/// SQL schema for the registry's own metadata.
pub const SCHEMA: &str = r#"
-- Installed form schemas, keyed by the table they define
CREATE TABLE IF NOT EXISTS fw_forms (
    table_name TEXT PRIMARY KEY,
    schema_json TEXT NOT NULL,
    installed_at TEXT NOT NULL
);
"#;

/// Local store for installed forms and their data.
pub struct TableRegistry {
    conn: Connection,
}

impl TableRegistry {
    /// Opens or creates the registry database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(TableRegistry { conn })
    }

    /// Opens an in-memory registry (tests and throwaway sessions).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(TableRegistry { conn })
    }

    /// Returns the names of all user tables, sorted.
    ///
    /// SQLite internals and the registry's own metadata table are
    /// excluded, so this is exactly the set the form-list merge treats
    /// as "installed".
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table'
               AND name NOT LIKE 'sqlite_%'
               AND name != 'fw_forms'
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Returns true if a user table with this name exists.
    pub fn has_table(&self, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'table' AND name = ?1 AND name NOT LIKE 'sqlite_%'",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Installs a form: creates its table and records the schema.
    ///
    /// Re-installing an already present form is a no-op for the table
    /// (CREATE TABLE IF NOT EXISTS) and replaces the recorded schema.
    pub fn install_form(&mut self, schema: &FormSchema) -> Result<()> {
        schema.validate()?;
        let tx = self.conn.transaction()?;
        tx.execute(&schema.create_table_sql(), [])?;
        tx.execute(
            "INSERT OR REPLACE INTO fw_forms (table_name, schema_json, installed_at)
             VALUES (?1, ?2, ?3)",
            params![
                schema.table_name,
                serde_json::to_string(schema)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Returns the recorded schema for a table, if one was installed.
    pub fn installed_form(&self, table_name: &str) -> Result<Option<FormSchema>> {
        use rusqlite::OptionalExtension;
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT schema_json FROM fw_forms WHERE table_name = ?1",
                params![table_name],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Returns all recorded form schemas, sorted by table name.
    pub fn installed_forms(&self) -> Result<Vec<FormSchema>> {
        let mut stmt = self
            .conn
            .prepare("SELECT schema_json FROM fw_forms ORDER BY table_name")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.iter()
            .map(|json| serde_json::from_str(json).map_err(Error::from))
            .collect()
    }

    /// Inserts pulled data rows into an installed form table.
    ///
    /// Columns are taken from the recorded schema; row keys with no
    /// matching field are ignored, as are rows carrying none of the
    /// schema's fields. Returns the number of rows inserted.
    pub fn insert_rows(
        &mut self,
        table_name: &str,
        rows: &[serde_json::Map<String, serde_json::Value>],
    ) -> Result<usize> {
        let schema = self
            .installed_form(table_name)?
            .ok_or_else(|| Error::FormNotFound(table_name.to_string()))?;

        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        for row in rows {
            let mut columns: Vec<&str> = Vec::new();
            let mut values: Vec<rusqlite::types::Value> = Vec::new();
            for field in &schema.fields {
                match row.get(&field.name) {
                    Some(value) if !value.is_null() => {
                        columns.push(field.name.as_str());
                        values.push(to_sql_value(field.field_type, value)?);
                    }
                    _ => {}
                }
            }
            if columns.is_empty() {
                continue;
            }
            let placeholders: Vec<String> =
                (1..=columns.len()).map(|i| format!("?{i}")).collect();
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                schema.table_name,
                columns.join(", "),
                placeholders.join(", ")
            );
            tx.execute(&sql, rusqlite::params_from_iter(values))?;
            inserted += 1;
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Counts rows in a table (verification helper).
    pub fn row_count(&self, table_name: &str) -> Result<i64> {
        if !self.has_table(table_name)? {
            return Err(Error::FormNotFound(table_name.to_string()));
        }
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {table_name}"),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

/// Converts a JSON value to a SQLite value according to the field type.
fn to_sql_value(
    field_type: FieldType,
    value: &serde_json::Value,
) -> Result<rusqlite::types::Value> {
    use rusqlite::types::Value as Sql;
    let converted = match field_type {
        FieldType::Boolean => value.as_bool().map(|b| Sql::Integer(b as i64)),
        FieldType::Integer => value.as_i64().map(Sql::Integer),
        FieldType::Double => value.as_f64().map(Sql::Real),
        FieldType::Date | FieldType::String | FieldType::Text | FieldType::Options => {
            value.as_str().map(|s| Sql::Text(s.to_string()))
        }
        FieldType::Json => Some(Sql::Text(serde_json::to_string(value)?)),
    };
    converted.ok_or_else(|| {
        Error::InvalidSchema(format!(
            "value {value} does not fit field type '{field_type}'"
        ))
    })
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
