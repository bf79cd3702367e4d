//! Construction specs handed to endpoint and processor factories.

use std::sync::Arc;

use serde_json::Value;

use super::EndpointConfig;
use crate::io::{FilesystemRegistry, default_filesystems};

/// Everything needed to construct one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    /// Source or sink identifier (path, URL or raw string payload)
    pub identifier: Option<String>,
    /// Parsed endpoint section
    pub config: EndpointConfig,
    /// The raw section, for custom endpoints reading their own keys
    pub section: Option<Value>,
    /// Filesystems available to url endpoints
    pub filesystems: Arc<FilesystemRegistry>,
}

impl EndpointSpec {
    /// Create a spec with the default filesystems.
    pub fn new(identifier: Option<String>, config: EndpointConfig) -> Self {
        Self {
            identifier,
            config,
            section: None,
            filesystems: Arc::new(default_filesystems()),
        }
    }

    /// Set the raw section.
    pub fn with_section(mut self, section: Option<Value>) -> Self {
        self.section = section;
        self
    }

    /// Set the filesystem registry.
    pub fn with_filesystems(mut self, filesystems: Arc<FilesystemRegistry>) -> Self {
        self.filesystems = filesystems;
        self
    }
}

/// Everything needed to construct one transfer step.
#[derive(Debug, Clone, Default)]
pub struct ProcessorSpec {
    /// The `processor` section, if any
    pub section: Option<Value>,
}

impl ProcessorSpec {
    pub fn new(section: Option<Value>) -> Self {
        Self { section }
    }
}
