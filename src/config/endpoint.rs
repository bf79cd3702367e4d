//! Per-endpoint configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::IoflowError;
use crate::io::BackendOptions;

/// Configuration of a single endpoint.
///
/// This is the `reader` or `writer` section of a workflow configuration.
/// Keys not listed here are collected, in order, into [`extra`](Self::extra)
/// for custom endpoints to read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Endpoint kind: "file", "url" or "string"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iotype: Option<String>,
    /// Open mode, e.g. "r", "rb", "w"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Text encoding label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Options forwarded to the filesystem of a url endpoint
    #[serde(default, alias = "fs_opts", skip_serializing_if = "BackendOptions::is_empty")]
    pub backend_options: BackendOptions,
    /// Default template of an output endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// Every other key of the section
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl EndpointConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration section; an absent or null section is empty.
    pub fn from_section(section: Option<&Value>) -> Result<Self, IoflowError> {
        match section {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => Self::deserialize(value).map_err(IoflowError::config),
        }
    }

    pub fn with_iotype(mut self, iotype: impl Into<String>) -> Self {
        self.iotype = Some(iotype.into());
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_backend_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.backend_options.insert(key.into(), value.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
