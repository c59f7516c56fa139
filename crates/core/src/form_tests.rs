// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

#![allow(clippy::unwrap_used)]

use super::*;

fn catalog_entry(name: &str, table: &str) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        table_name: table.to_string(),
        reference: FormRef::new("mobile", "forms").with_param("t", table),
    }
}

#[test]
fn merge_marks_installed_from_local_tables() {
    let catalog = vec![
        catalog_entry("Incident", "incident"),
        catalog_entry("Assessment", "assessment"),
    ];
    let local = vec!["incident".to_string()];

    let list = update_form_list(&[], &local, catalog);

    assert_eq!(list.len(), 2);
    assert!(list[0].installed);
    assert!(!list[1].installed);
    assert!(list[0].download);
    assert!(list[1].download);
}

#[test]
fn merge_carries_forward_download_choice() {
    let first = update_form_list(&[], &[], vec![catalog_entry("Incident", "incident")]);
    let mut prior = first.clone();
    prior[0].download = false;

    let refreshed = update_form_list(
        &prior,
        &[],
        vec![
            catalog_entry("Incident", "incident"),
            catalog_entry("Assessment", "assessment"),
        ],
    );

    assert!(!refreshed[0].download, "user choice must survive refresh");
    assert!(refreshed[1].download, "new entries default to download");
}

#[test]
fn merge_matches_prior_by_table_name_not_name() {
    let prior = vec![FormListEntry {
        name: "Old Label".to_string(),
        table_name: "incident".to_string(),
        reference: FormRef::new("mobile", "forms"),
        installed: false,
        download: false,
    }];

    let refreshed = update_form_list(&prior, &[], vec![catalog_entry("Renamed", "incident")]);

    assert_eq!(refreshed[0].name, "Renamed");
    assert!(!refreshed[0].download);
}

#[test]
fn merge_preserves_catalog_order() {
    let catalog = vec![
        catalog_entry("B", "b"),
        catalog_entry("A", "a"),
        catalog_entry("C", "c"),
    ];
    let list = update_form_list(&[], &[], catalog);
    let tables: Vec<&str> = list.iter().map(|e| e.table_name.as_str()).collect();
    assert_eq!(tables, vec!["b", "a", "c"]);
}

#[test]
fn empty_catalog_yields_empty_list() {
    let prior = update_form_list(&[], &[], vec![catalog_entry("Incident", "incident")]);
    let list = update_form_list(&prior, &["incident".to_string()], vec![]);
    assert!(list.is_empty());
}

#[test]
fn catalog_entry_deserializes_compact_wire_keys() {
    let json = r#"{"n": "Incident", "t": "incident", "r": {"c": "mobile", "f": "forms", "v": {"t": "incident"}}}"#;
    let entry: CatalogEntry = serde_json::from_str(json).unwrap();
    assert_eq!(entry.name, "Incident");
    assert_eq!(entry.table_name, "incident");
    assert_eq!(entry.reference.controller, "mobile");
    assert_eq!(entry.reference.params.get("t").map(String::as_str), Some("incident"));
}

#[test]
fn form_ref_params_are_optional_on_the_wire() {
    let json = r#"{"c": "mobile", "f": "forms"}"#;
    let reference: FormRef = serde_json::from_str(json).unwrap();
    assert!(reference.params.is_empty());

    let back = serde_json::to_value(&reference).unwrap();
    assert!(back.get("v").is_none());
}
