//! The endpoint handle: configuration merging and the open/close lifecycle.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use super::EndpointKind;
use crate::config::{EndpointConfig, EndpointSpec};
use crate::error::IoflowError;
use crate::io::{
    BackendOptions, Codec, FilesystemRegistry, OpenMode, ResourceStream, StringBuffer,
    default_filesystems, open_local, scheme_of,
};
use crate::payload::Payload;

/// Mode used for file and url endpoints when nothing else sets one.
const FALLBACK_MODE: &str = "r";

/// Arguments to [`EndpointHandle::open`].
///
/// Every present field overwrites the handle's current setting, and the
/// change persists for later opens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenRequest {
    pub identifier: Option<String>,
    pub kind: Option<String>,
    pub mode: Option<String>,
    pub encoding: Option<String>,
    /// Merged into the endpoint's backend options, key by key
    pub backend_options: BackendOptions,
}

impl OpenRequest {
    /// Create a request that keeps every current setting.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn backend_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.backend_options.insert(key.into(), value.into());
        self
    }
}

/// The open options that apply to the endpoint's kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Always `None` for string endpoints
    pub mode: Option<String>,
    pub encoding: Option<String>,
}

/// The live resource of an open endpoint.
#[derive(Debug)]
pub struct OpenResource {
    stream: Box<dyn ResourceStream>,
    mode: Option<OpenMode>,
    codec: Codec,
    scheme: Option<String>,
}

impl OpenResource {
    /// Parsed mode; `None` for string endpoints.
    pub fn mode(&self) -> Option<&OpenMode> {
        self.mode.as_ref()
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Transport scheme of a url endpoint.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn is_binary(&self) -> bool {
        self.mode.is_some_and(|mode| mode.binary)
    }

    pub fn is_remote(&self) -> bool {
        self.scheme.is_some()
    }
}

/// An I/O endpoint: identifier, kind, configuration and at most one open
/// resource.
///
/// The kind is kept as text and only parsed when `open` dispatches on it, so
/// an invalid kind is accepted until then.
#[derive(Debug)]
pub struct EndpointHandle {
    identifier: Option<String>,
    kind: String,
    config: EndpointConfig,
    filesystems: Arc<FilesystemRegistry>,
    resource: Option<OpenResource>,
}

impl EndpointHandle {
    /// Create a handle; the kind is taken from the config's `iotype`.
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            identifier: None,
            kind: config.iotype.clone().unwrap_or_default(),
            config,
            filesystems: Arc::new(default_filesystems()),
            resource: None,
        }
    }

    /// Create a handle from a factory spec.
    pub fn from_spec(spec: EndpointSpec) -> Self {
        let mut handle = Self::new(spec.config).with_filesystems(spec.filesystems);
        handle.identifier = spec.identifier;
        handle
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Override the kind given by the configuration.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_filesystems(mut self, filesystems: Arc<FilesystemRegistry>) -> Self {
        self.filesystems = filesystems;
        self
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// The kind as configured, possibly invalid or empty.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn filesystems(&self) -> &Arc<FilesystemRegistry> {
        &self.filesystems
    }

    pub fn is_open(&self) -> bool {
        self.resource.is_some()
    }

    pub fn resource(&self) -> Option<&OpenResource> {
        self.resource.as_ref()
    }

    /// Transport scheme recorded when a url endpoint was opened.
    pub fn scheme(&self) -> Option<&str> {
        self.resource.as_ref()?.scheme()
    }

    /// The effective `{mode, encoding}` for the current kind.
    pub fn resolved_options(&self) -> Result<ResolvedOptions, IoflowError> {
        let kind = EndpointKind::parse(&self.kind)?;
        Ok(self.options_for(kind))
    }

    fn options_for(&self, kind: EndpointKind) -> ResolvedOptions {
        ResolvedOptions {
            mode: kind.uses_mode().then(|| self.config.mode.clone()).flatten(),
            encoding: self.config.encoding.clone(),
        }
    }

    /// Open the endpoint.
    ///
    /// The request is merged into the handle first. A live resource is
    /// closed before the new one is opened.
    pub fn open(&mut self, request: OpenRequest) -> Result<&mut Self, IoflowError> {
        let OpenRequest {
            identifier,
            kind,
            mode,
            encoding,
            backend_options,
        } = request;

        // Empty strings count as not given.
        if let Some(identifier) = non_empty(identifier) {
            self.identifier = Some(identifier);
        }
        if let Some(kind) = non_empty(kind) {
            self.kind = kind;
        }
        if let Some(mode) = non_empty(mode) {
            self.config.mode = Some(mode);
        }
        if let Some(encoding) = non_empty(encoding) {
            self.config.encoding = Some(encoding);
        }
        self.config.backend_options.extend(backend_options);
        debug!(
            identifier = ?self.identifier,
            kind = %self.kind,
            config = ?self.config,
            "effective endpoint configuration"
        );

        if self.resource.is_some() {
            debug!("closing live resource before re-opening");
            self.close()?;
        }

        let kind = EndpointKind::parse(&self.kind)?;
        let options = self.options_for(kind);
        debug!(%kind, mode = ?options.mode, encoding = ?options.encoding, "effective open options");

        let resource = self.open_resource(kind, &options)?;
        self.resource = Some(resource);
        Ok(self)
    }

    fn open_resource(
        &self,
        kind: EndpointKind,
        options: &ResolvedOptions,
    ) -> Result<OpenResource, IoflowError> {
        let codec = match options.encoding.as_deref() {
            Some(label) => Codec::for_label(label)?,
            None => Codec::default(),
        };

        match kind {
            EndpointKind::File => {
                let path = self.require_identifier(kind)?;
                let mode = OpenMode::parse(options.mode.as_deref().unwrap_or(FALLBACK_MODE))?;
                let stream = open_local(Path::new(path), &mode)?;
                Ok(OpenResource {
                    stream,
                    mode: Some(mode),
                    codec,
                    scheme: None,
                })
            }
            EndpointKind::Url => {
                let url = self.require_identifier(kind)?;
                let mode = OpenMode::parse(options.mode.as_deref().unwrap_or(FALLBACK_MODE))?;
                let scheme = scheme_of(url)?;
                let filesystem = self
                    .filesystems
                    .filesystem(&scheme, &self.config.backend_options)?;
                let stream = filesystem.open(url, &mode)?;
                debug!(url, %scheme, "opened remote resource");
                Ok(OpenResource {
                    stream,
                    mode: Some(mode),
                    codec,
                    scheme: Some(scheme),
                })
            }
            EndpointKind::String => {
                let initial = match self.identifier.as_deref() {
                    Some(text) => codec.encode(text)?,
                    None => Vec::new(),
                };
                Ok(OpenResource {
                    stream: Box::new(StringBuffer::new(initial)),
                    mode: None,
                    codec,
                    scheme: None,
                })
            }
        }
    }

    fn require_identifier(&self, kind: EndpointKind) -> Result<&str, IoflowError> {
        self.identifier
            .as_deref()
            .ok_or(IoflowError::MissingIdentifier(kind))
    }

    /// Release the open resource.
    ///
    /// Fails with `ResourceNotOpen` when there is nothing to release. The
    /// handle is closed afterwards even if releasing fails.
    pub fn close(&mut self) -> Result<&mut Self, IoflowError> {
        let mut resource = self.resource.take().ok_or(IoflowError::ResourceNotOpen)?;
        resource.stream.close()?;
        Ok(self)
    }

    /// Read all remaining contents: text in text mode, bytes in binary mode.
    pub fn read_to_end(&mut self) -> Result<Payload, IoflowError> {
        let resource = self.resource.as_mut().ok_or(IoflowError::ResourceNotOpen)?;
        let mut bytes = Vec::new();
        resource.stream.read_to_end(&mut bytes)?;
        trace!(bytes = bytes.len(), "read endpoint contents");

        if resource.is_binary() {
            Ok(Payload::Bytes(bytes))
        } else {
            resource.codec.decode(&bytes).map(Payload::Text)
        }
    }

    /// Persist a payload to the open resource and flush it.
    ///
    /// Text is encoded with the endpoint codec, bytes are written as-is and
    /// structured data is written as JSON.
    pub fn write_payload(&mut self, payload: &Payload) -> Result<(), IoflowError> {
        let resource = self.resource.as_mut().ok_or(IoflowError::ResourceNotOpen)?;
        let encoded;
        let bytes: &[u8] = match payload {
            Payload::Text(text) => {
                encoded = resource.codec.encode(text)?;
                &encoded
            }
            Payload::Bytes(bytes) => bytes,
            Payload::Data(value) => {
                encoded = serde_json::to_vec(value)?;
                &encoded
            }
        };

        resource.stream.write_all(bytes)?;
        resource.stream.flush()?;
        trace!(bytes = bytes.len(), "wrote endpoint contents");
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
