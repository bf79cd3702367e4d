//! Template rendering for output endpoints.
//!
//! Templates are loaded by path from the filesystem root and rendered with
//! block trimming enabled: whitespace before a block tag on its line is
//! stripped and the first newline after a block tag is removed. These
//! settings are fixed.

use std::io;
use std::path::Path;

use minijinja::Environment;
use serde_json::Value;

use crate::error::IoflowError;

const TEMPLATE_ROOT: &str = "/";

/// Render the template at `template` with `data` as its variables.
///
/// `data` must be a mapping.
pub fn render(template: &Path, data: &Value) -> Result<String, IoflowError> {
    if !data.is_object() {
        return Err(IoflowError::TemplateContext(describe(data)));
    }

    let env = environment();
    let name = template.to_string_lossy();
    let tmpl = env.get_template(&name)?;
    tracing::debug!(template = %name, "rendering template");
    Ok(tmpl.render(data)?)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_loader(root_loader);
    env
}

fn root_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let path = Path::new(TEMPLATE_ROOT).join(name);
    match std::fs::read_to_string(&path) {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            format!("cannot read template {}", path.display()),
        )
        .with_source(e)),
    }
}
