//! Tests for output rendering and templates.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use tempfile::{TempDir, tempdir};

use crate::config::EndpointConfig;
use crate::endpoint::{EndpointHandle, OutputEndpoint, Writer, scoped};
use crate::error::{ErrorKind, IoflowError};
use crate::io::{FilesystemRegistry, MemoryFilesystem};
use crate::payload::Payload;

fn template(source: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("page.j2");
    fs::write(&path, source).unwrap();
    (dir, path)
}

fn string_writer() -> Writer {
    Writer::from_config(EndpointConfig::new().with_iotype("string"))
}

#[test]
fn render_without_template_passes_data_through() {
    let mut writer = string_writer();
    let out = writer.render(Payload::from("as is"), None).unwrap();
    assert_eq!(out, &Payload::from("as is"));
    assert_eq!(writer.output(), Some(&Payload::from("as is")));
}

#[test]
fn render_substitutes_mapping_values() {
    let (_dir, path) = template("Hello {{ name }}!");
    let mut writer = string_writer();

    let out = writer
        .render(Payload::Data(json!({"name": "Ada"})), Some(path.as_path()))
        .unwrap();
    assert_eq!(out, &Payload::from("Hello Ada!"));
}

#[test]
fn block_tags_do_not_leave_blank_lines() {
    let source = "\
{% for item in items %}
  {% if item %}
{{ item }}
  {% endif %}
{% endfor %}
";
    let (_dir, path) = template(source);
    let mut writer = string_writer();

    let out = writer
        .render(Payload::Data(json!({"items": ["a", "", "b"]})), Some(path.as_path()))
        .unwrap();
    assert_eq!(out.as_text(), Some("a\nb\n"));
}

#[test]
fn configured_template_is_the_default() {
    let (_dir, path) = template("[{{ level }}] {{ message }}");
    let mut writer = Writer::from_config(
        EndpointConfig::new()
            .with_iotype("string")
            .with_template(&path),
    );
    assert_eq!(writer.defaults().template.as_deref(), Some(path.as_path()));

    let out = scoped(&mut writer, |w| {
        w.write(Payload::Data(json!({"level": "warn", "message": "disk low"})))
            .cloned()
    })
    .unwrap();
    assert_eq!(out, Payload::from("[warn] disk low"));
}

#[test]
fn passed_template_beats_the_default() {
    let (_dir, default) = template("default");
    let (_other, chosen) = template("chosen {{ x }}");
    let mut writer = string_writer().with_default_template(&default);

    let out = writer
        .render(Payload::Data(json!({"x": 1})), Some(chosen.as_path()))
        .unwrap();
    assert_eq!(out, &Payload::from("chosen 1"));
}

#[test]
fn templates_need_a_mapping() {
    let (_dir, path) = template("{{ x }}");
    let mut writer = string_writer();

    let err = writer
        .render(Payload::Data(json!([1, 2])), Some(path.as_path()))
        .unwrap_err();
    assert!(matches!(err, IoflowError::TemplateContext("a sequence")));

    let err = writer.render(Payload::from("x"), Some(path.as_path())).unwrap_err();
    assert!(matches!(err, IoflowError::TemplateContext("text")));
    assert_eq!(err.kind(), ErrorKind::Template);
}

#[test]
fn missing_template_is_a_template_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.j2");
    let mut writer = string_writer();

    let err = writer
        .render(Payload::Data(json!({})), Some(path.as_path()))
        .unwrap_err();
    assert!(matches!(err, IoflowError::Template(_)));
}

#[test]
fn data_without_template_is_written_as_json() {
    let memory = MemoryFilesystem::new();
    let registry = Arc::new(
        FilesystemRegistry::new().with_filesystem("memory", Arc::new(memory.clone())),
    );
    let mut writer = Writer::new(
        EndpointHandle::new(EndpointConfig::new().with_iotype("url"))
            .with_identifier("memory://out.json")
            .with_filesystems(registry),
    );

    scoped(&mut writer, |w| w.write(Payload::Data(json!({"b": 1, "a": [true]}))).cloned())
        .unwrap();
    assert_eq!(
        memory.contents("memory://out.json"),
        Some(br#"{"b":1,"a":[true]}"#.to_vec())
    );
}

#[test]
fn write_without_open_keeps_the_rendered_output() {
    let mut writer = string_writer();
    let err = writer.write(Payload::from("x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceNotOpen);
    assert_eq!(writer.output(), Some(&Payload::from("x")));
}
