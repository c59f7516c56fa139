// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

#![allow(clippy::unwrap_used)]

use super::*;
use crate::schema::FieldDef;
use serde_json::json;
use tempfile::TempDir;

fn incident_schema() -> FormSchema {
    FormSchema {
        table_name: "incident".to_string(),
        fields: vec![
            FieldDef {
                name: "title".to_string(),
                field_type: FieldType::String,
                required: true,
                label: None,
            },
            FieldDef {
                name: "severity".to_string(),
                field_type: FieldType::Integer,
                required: false,
                label: None,
            },
            FieldDef {
                name: "confirmed".to_string(),
                field_type: FieldType::Boolean,
                required: false,
                label: None,
            },
            FieldDef {
                name: "details".to_string(),
                field_type: FieldType::Json,
                required: false,
                label: None,
            },
        ],
    }
}

fn row(title: &str) -> serde_json::Map<String, serde_json::Value> {
    json!({
        "title": title,
        "severity": 3,
        "confirmed": true,
        "details": {"source": "radio"},
        "unknown_key": "ignored",
    })
    .as_object()
    .unwrap()
    .clone()
}

#[test]
fn fresh_registry_has_no_user_tables() {
    let registry = TableRegistry::open_in_memory().unwrap();
    assert!(registry.table_names().unwrap().is_empty());
    assert!(!registry.has_table("incident").unwrap());
}

#[test]
fn install_form_creates_table_and_records_schema() {
    let mut registry = TableRegistry::open_in_memory().unwrap();
    registry.install_form(&incident_schema()).unwrap();

    assert_eq!(registry.table_names().unwrap(), vec!["incident"]);
    assert!(registry.has_table("incident").unwrap());

    let recorded = registry.installed_form("incident").unwrap().unwrap();
    assert_eq!(recorded, incident_schema());
}

#[test]
fn install_form_is_idempotent() {
    let mut registry = TableRegistry::open_in_memory().unwrap();
    registry.install_form(&incident_schema()).unwrap();
    registry.insert_rows("incident", &[row("first")]).unwrap();

    // Second install keeps the table and its rows
    registry.install_form(&incident_schema()).unwrap();
    assert_eq!(registry.row_count("incident").unwrap(), 1);
}

#[test]
fn install_form_rejects_invalid_schema() {
    let mut registry = TableRegistry::open_in_memory().unwrap();
    let mut schema = incident_schema();
    schema.table_name = "1bad".to_string();
    assert!(registry.install_form(&schema).is_err());
    assert!(registry.table_names().unwrap().is_empty());
}

#[test]
fn insert_rows_stores_typed_values() {
    let mut registry = TableRegistry::open_in_memory().unwrap();
    registry.install_form(&incident_schema()).unwrap();

    let inserted = registry
        .insert_rows("incident", &[row("flood"), row("fire")])
        .unwrap();
    assert_eq!(inserted, 2);
    assert_eq!(registry.row_count("incident").unwrap(), 2);
}

#[test]
fn insert_rows_skips_empty_and_null_only_rows() {
    let mut registry = TableRegistry::open_in_memory().unwrap();
    registry.install_form(&incident_schema()).unwrap();

    let empty = serde_json::Map::new();
    let nulls = json!({"title": null}).as_object().unwrap().clone();
    let inserted = registry.insert_rows("incident", &[empty, nulls]).unwrap();
    assert_eq!(inserted, 0);
    assert_eq!(registry.row_count("incident").unwrap(), 0);
}

#[test]
fn insert_rows_requires_installed_form() {
    let mut registry = TableRegistry::open_in_memory().unwrap();
    let err = registry.insert_rows("incident", &[row("x")]).unwrap_err();
    assert!(matches!(err, Error::FormNotFound(_)));
}

#[test]
fn insert_rows_rejects_mistyped_values() {
    let mut registry = TableRegistry::open_in_memory().unwrap();
    registry.install_form(&incident_schema()).unwrap();

    let bad = json!({"severity": "not a number"}).as_object().unwrap().clone();
    let err = registry.insert_rows("incident", &[bad]).unwrap_err();
    assert!(matches!(err, Error::InvalidSchema(_)));
}

#[test]
fn registry_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fieldwork.db");

    {
        let mut registry = TableRegistry::open(&path).unwrap();
        registry.install_form(&incident_schema()).unwrap();
        registry.insert_rows("incident", &[row("flood")]).unwrap();
    }

    {
        let registry = TableRegistry::open(&path).unwrap();
        assert_eq!(registry.table_names().unwrap(), vec!["incident"]);
        assert_eq!(registry.row_count("incident").unwrap(), 1);
        assert_eq!(registry.installed_forms().unwrap().len(), 1);
    }
}
