//! Tests for EndpointConfig parsing.

use serde_json::json;

use crate::config::EndpointConfig;
use crate::error::ErrorKind;

#[test]
fn absent_or_null_section_is_empty() {
    assert_eq!(EndpointConfig::from_section(None).unwrap(), EndpointConfig::default());
    assert_eq!(
        EndpointConfig::from_section(Some(&json!(null))).unwrap(),
        EndpointConfig::default()
    );
}

#[test]
fn known_keys_are_parsed_into_fields() {
    let section = json!({
        "iotype": "url",
        "mode": "rb",
        "encoding": "latin1",
        "backend_options": {"region": "eu"},
        "template": "/srv/templates/page.j2",
        "retries": 3
    });
    let config = EndpointConfig::from_section(Some(&section)).unwrap();

    assert_eq!(config.iotype.as_deref(), Some("url"));
    assert_eq!(config.mode.as_deref(), Some("rb"));
    assert_eq!(config.encoding.as_deref(), Some("latin1"));
    assert_eq!(config.backend_options.get("region"), Some(&json!("eu")));
    assert_eq!(
        config.template.as_deref(),
        Some(std::path::Path::new("/srv/templates/page.j2"))
    );
    assert_eq!(config.extra.len(), 1);
}

#[test]
fn unknown_keys_are_kept_in_order() {
    let section = json!({
        "iotype": "file",
        "retries": 3,
        "fs_opts": {"anon": true},
        "delimiter": ";",
        "columns": ["a", "b"]
    });
    let config = EndpointConfig::from_section(Some(&section)).unwrap();

    let keys: Vec<&str> = config.extra.keys().map(String::as_str).collect();
    assert_eq!(keys, ["retries", "delimiter", "columns"]);
    assert_eq!(config.extra.get("retries"), Some(&json!(3)));
    assert_eq!(config.backend_options.get("anon"), Some(&json!(true)));

    let back = serde_json::to_value(&config).unwrap();
    assert_eq!(back["delimiter"], json!(";"));
    assert_eq!(back["iotype"], json!("file"));
}

#[test]
fn fs_opts_is_an_alias_for_backend_options() {
    let section = json!({"iotype": "url", "fs_opts": {"anon": true}});
    let config = EndpointConfig::from_section(Some(&section)).unwrap();
    assert_eq!(config.backend_options.get("anon"), Some(&json!(true)));
}

#[test]
fn wrong_value_types_are_config_errors() {
    let err = EndpointConfig::from_section(Some(&json!({"mode": 5}))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);

    let err = EndpointConfig::from_section(Some(&json!("file"))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn builders_set_fields() {
    let config = EndpointConfig::new()
        .with_iotype("file")
        .with_mode("w")
        .with_encoding("utf-8")
        .with_backend_option("k", 1)
        .with_template("/t.j2")
        .with_extra("retries", 2);

    assert_eq!(config.iotype.as_deref(), Some("file"));
    assert_eq!(config.mode.as_deref(), Some("w"));
    assert_eq!(config.encoding.as_deref(), Some("utf-8"));
    assert_eq!(config.backend_options.get("k"), Some(&json!(1)));
    assert!(config.template.is_some());
    assert_eq!(config.extra.get("retries"), Some(&json!(2)));
}
