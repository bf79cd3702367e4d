//! Filesystem-like backends for url endpoints.
//!
//! A url endpoint resolves the scheme of its identifier, asks the
//! [`FilesystemRegistry`] for a [`Filesystem`] built from the endpoint's
//! backend options, and opens the identifier through it.

use std::collections::HashMap;
use std::fmt::Debug;
use std::io;
use std::sync::Arc;

use crate::error::IoflowError;

use super::{LocalFilesystem, MemoryFilesystem, OpenMode, ResourceStream};

/// Backend-specific options forwarded opaquely to filesystem factories.
pub type BackendOptions = serde_json::Map<String, serde_json::Value>;

/// Marks an [`io::Error`] as a transport failure of a remote backend.
///
/// Backends wrap failures with no fitting [`io::ErrorKind`], such as a 5xx
/// answer, so that they classify as transport errors.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportFailure(pub String);

/// Build an [`io::Error`] carrying a [`TransportFailure`].
pub fn transport_error(message: impl Into<String>) -> io::Error {
    io::Error::other(TransportFailure(message.into()))
}

/// A filesystem reachable through URLs of one scheme.
pub trait Filesystem: Send + Sync + Debug {
    /// Open the URL with the given mode.
    fn open(&self, url: &str, mode: &OpenMode) -> io::Result<Box<dyn ResourceStream>>;
}

/// Builds a filesystem from backend options.
pub type FilesystemFactory =
    Arc<dyn Fn(&BackendOptions) -> io::Result<Arc<dyn Filesystem>> + Send + Sync>;

/// Registry of filesystem factories keyed by URL scheme.
#[derive(Clone, Default)]
pub struct FilesystemRegistry {
    factories: HashMap<String, FilesystemFactory>,
}

impl std::fmt::Debug for FilesystemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut schemes: Vec<&str> = self.schemes().collect();
        schemes.sort_unstable();
        f.debug_struct("FilesystemRegistry")
            .field("schemes", &schemes)
            .finish()
    }
}

impl FilesystemRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a scheme, replacing any previous one.
    pub fn register<F>(&mut self, scheme: &str, factory: F)
    where
        F: Fn(&BackendOptions) -> io::Result<Arc<dyn Filesystem>> + Send + Sync + 'static,
    {
        self.factories
            .insert(scheme.to_ascii_lowercase(), Arc::new(factory));
    }

    /// Register a ready-made filesystem that ignores backend options.
    pub fn register_filesystem(&mut self, scheme: &str, filesystem: Arc<dyn Filesystem>) {
        self.register(scheme, move |_| Ok(filesystem.clone()));
    }

    /// Builder-style variant of [`register_filesystem`](Self::register_filesystem).
    pub fn with_filesystem(mut self, scheme: &str, filesystem: Arc<dyn Filesystem>) -> Self {
        self.register_filesystem(scheme, filesystem);
        self
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.factories.contains_key(&scheme.to_ascii_lowercase())
    }

    pub fn schemes(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build the filesystem for a scheme.
    pub fn filesystem(
        &self,
        scheme: &str,
        options: &BackendOptions,
    ) -> Result<Arc<dyn Filesystem>, IoflowError> {
        let factory = self
            .factories
            .get(&scheme.to_ascii_lowercase())
            .ok_or_else(|| IoflowError::UnsupportedScheme(scheme.to_string()))?;
        Ok(factory(options)?)
    }
}

/// Parse the transport scheme of a URL identifier.
pub fn scheme_of(identifier: &str) -> Result<String, IoflowError> {
    url::Url::parse(identifier)
        .map(|url| url.scheme().to_string())
        .map_err(|source| IoflowError::InvalidUrl {
            url: identifier.to_string(),
            source,
        })
}

/// Create a registry with the built-in filesystems.
///
/// - `file`: local paths given as `file://` URLs
/// - `memory`: a store private to this registry
/// - `http`, `https`: read-only HTTP client (requires the `http` feature)
pub fn default_filesystems() -> FilesystemRegistry {
    let mut registry = FilesystemRegistry::new();
    registry.register_filesystem("file", Arc::new(LocalFilesystem::new()));
    registry.register_filesystem("memory", Arc::new(MemoryFilesystem::new()));

    #[cfg(feature = "http")]
    {
        for scheme in ["http", "https"] {
            registry.register(scheme, |options| {
                Ok(Arc::new(super::HttpFilesystem::from_options(options)?) as Arc<dyn Filesystem>)
            });
        }
    }

    registry
}
