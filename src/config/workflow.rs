//! Workflow configuration: named sections loaded from JSON, YAML or TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::IoflowError;

/// Configuration for a workflow.
///
/// A mapping of section names to section contents. The coordinator reads
/// `reader`, `writer`, `processor` and `logger`; other sections are kept for
/// custom factories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowConfig {
    sections: Map<String, Value>,
}

impl WorkflowConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration reading a local file into a local file.
    pub fn file_to_file() -> Self {
        Self::new()
            .with_section("reader", serde_json::json!({ "iotype": "file" }))
            .with_section("writer", serde_json::json!({ "iotype": "file" }))
    }

    /// Create a configuration from an existing mapping.
    pub fn from_map(sections: Map<String, Value>) -> Self {
        Self { sections }
    }

    /// Add or replace a section.
    pub fn with_section(mut self, name: impl Into<String>, section: Value) -> Self {
        self.sections.insert(name.into(), section);
        self
    }

    /// Get a section by name.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> &Map<String, Value> {
        &self.sections
    }

    pub fn from_json_str(s: &str) -> Result<Self, IoflowError> {
        serde_json::from_str(s).map_err(IoflowError::config)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, IoflowError> {
        serde_yaml::from_str(s).map_err(IoflowError::config)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, IoflowError> {
        toml::from_str(s).map_err(IoflowError::config)
    }

    /// Load a configuration file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IoflowError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Self::from_json_str(&contents),
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml_str(&contents),
            other => Err(IoflowError::config(format!(
                "unsupported configuration format '{}' for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}
