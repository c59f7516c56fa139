// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn incident_schema() -> FormSchema {
    FormSchema {
        table_name: "incident".to_string(),
        fields: vec![
            FieldDef {
                name: "title".to_string(),
                field_type: FieldType::String,
                required: true,
                label: Some("Title".to_string()),
            },
            FieldDef {
                name: "severity".to_string(),
                field_type: FieldType::Integer,
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

#[parameterized(
    boolean = { FieldType::Boolean, "INTEGER" },
    integer = { FieldType::Integer, "INTEGER" },
    double = { FieldType::Double, "REAL" },
    date = { FieldType::Date, "TEXT" },
    string = { FieldType::String, "TEXT" },
    text = { FieldType::Text, "TEXT" },
    options = { FieldType::Options, "TEXT" },
    json = { FieldType::Json, "TEXT" },
)]
fn field_types_map_to_sql(field_type: FieldType, expected: &str) {
    assert_eq!(field_type.sql_type(), expected);
}

#[test]
fn field_type_parses_from_str() {
    assert_eq!("boolean".parse::<FieldType>().unwrap(), FieldType::Boolean);
    assert!(matches!(
        "blob".parse::<FieldType>(),
        Err(Error::InvalidSchema(_))
    ));
}

#[test]
fn create_table_sql_shape() {
    let sql = incident_schema().create_table_sql();
    assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS incident"));
    assert!(sql.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
    assert!(sql.contains("title TEXT NOT NULL"));
    assert!(sql.contains("severity INTEGER"));
    assert!(sql.contains("details TEXT"));
}

#[test]
fn validate_accepts_well_formed_schema() {
    assert!(incident_schema().validate().is_ok());
}

#[parameterized(
    empty_name = { "" },
    leading_digit = { "1incident" },
    quote = { "incident\"; DROP TABLE x; --" },
    space = { "my table" },
)]
fn validate_rejects_bad_table_names(name: &str) {
    let mut schema = incident_schema();
    schema.table_name = name.to_string();
    assert!(matches!(schema.validate(), Err(Error::InvalidSchema(_))));
}

#[test]
fn validate_rejects_empty_field_list() {
    let schema = FormSchema {
        table_name: "incident".to_string(),
        fields: vec![],
    };
    assert!(matches!(schema.validate(), Err(Error::InvalidSchema(_))));
}

#[test]
fn validate_rejects_duplicate_fields() {
    let mut schema = incident_schema();
    schema.fields.push(FieldDef {
        name: "title".to_string(),
        field_type: FieldType::Text,
        required: false,
        label: None,
    });
    assert!(matches!(schema.validate(), Err(Error::InvalidSchema(_))));
}

#[test]
fn validate_rejects_reserved_id_field() {
    let mut schema = incident_schema();
    schema.fields[0].name = "id".to_string();
    assert!(matches!(schema.validate(), Err(Error::InvalidSchema(_))));
}

#[test]
fn payload_data_defaults_to_empty() {
    let json = r#"{"schema": {"table_name": "incident", "fields": [
        {"name": "title", "type": "string", "required": true}
    ]}}"#;
    let payload: FormPayload = serde_json::from_str(json).unwrap();
    assert_eq!(payload.schema.table_name, "incident");
    assert!(payload.data.is_empty());
    assert!(payload.schema.fields[0].required);
}
