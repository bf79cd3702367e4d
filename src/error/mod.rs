//! Error types for ioflow endpoints and workflows.
//!
//! This module provides:
//! - `IoflowError`: The single error type returned by every operation
//! - `ErrorKind`: A coarse classification for matching on failures
//!
//! Native backend errors (`std::io::Error`, `minijinja::Error`, ...) are kept
//! as-is inside the variants; nothing here translates them.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::endpoint::EndpointKind;
use crate::io::TransportFailure;

/// Coarse classification of an [`IoflowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedEndpointKind,
    MissingIdentifier,
    NotFound,
    PermissionDenied,
    DecodeError,
    EncodeError,
    /// Remote backend connection or protocol failure
    TransportError,
    ResourceNotOpen,
    InvalidMode,
    UnknownEncoding,
    InvalidUrl,
    UnsupportedScheme,
    Template,
    /// Structured input could not be parsed
    Parse,
    Config,
    Logging,
    /// A body failure followed by a failed release
    ReleaseAfterFailure,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnsupportedEndpointKind => "UnsupportedEndpointKind",
            ErrorKind::MissingIdentifier => "MissingIdentifier",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::DecodeError => "DecodeError",
            ErrorKind::EncodeError => "EncodeError",
            ErrorKind::TransportError => "TransportError",
            ErrorKind::ResourceNotOpen => "ResourceNotOpen",
            ErrorKind::InvalidMode => "InvalidMode",
            ErrorKind::UnknownEncoding => "UnknownEncoding",
            ErrorKind::InvalidUrl => "InvalidUrl",
            ErrorKind::UnsupportedScheme => "UnsupportedScheme",
            ErrorKind::Template => "Template",
            ErrorKind::Parse => "Parse",
            ErrorKind::Config => "Config",
            ErrorKind::Logging => "Logging",
            ErrorKind::ReleaseAfterFailure => "ReleaseAfterFailure",
            ErrorKind::Io => "Io",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum IoflowError {
    /// The endpoint kind is none of file, url or string
    #[error("unsupported endpoint kind '{0}'")]
    UnsupportedEndpointKind(String),

    #[error("{0} endpoint requires an identifier")]
    MissingIdentifier(EndpointKind),

    /// Read, write or close without a prior successful open
    #[error("endpoint has no open resource")]
    ResourceNotOpen,

    #[error("invalid open mode '{mode}': {reason}")]
    InvalidMode { mode: String, reason: String },

    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("input is not valid {encoding}")]
    Decode { encoding: &'static str },

    #[error("output cannot be represented in {encoding}")]
    Encode { encoding: &'static str },

    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no filesystem registered for scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Templates need a mapping of substitution variables
    #[error("template data must be a mapping, got {0}")]
    TemplateContext(&'static str),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Config(Box<dyn std::error::Error + Send + Sync>),

    #[error("logging setup failed: {0}")]
    Logging(String),

    /// The scoped body failed and releasing the endpoint failed afterwards.
    #[error("{body} (releasing the endpoint also failed: {release})")]
    ReleaseAfterFailure {
        body: Box<IoflowError>,
        release: Box<IoflowError>,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl IoflowError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IoflowError::UnsupportedEndpointKind(_) => ErrorKind::UnsupportedEndpointKind,
            IoflowError::MissingIdentifier(_) => ErrorKind::MissingIdentifier,
            IoflowError::ResourceNotOpen => ErrorKind::ResourceNotOpen,
            IoflowError::InvalidMode { .. } => ErrorKind::InvalidMode,
            IoflowError::UnknownEncoding(_) => ErrorKind::UnknownEncoding,
            IoflowError::Decode { .. } => ErrorKind::DecodeError,
            IoflowError::Encode { .. } => ErrorKind::EncodeError,
            IoflowError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            IoflowError::UnsupportedScheme(_) => ErrorKind::UnsupportedScheme,
            IoflowError::Template(_) | IoflowError::TemplateContext(_) => ErrorKind::Template,
            IoflowError::Json(_) => ErrorKind::Parse,
            #[cfg(feature = "yaml")]
            IoflowError::Yaml(_) => ErrorKind::Parse,
            IoflowError::Config(_) => ErrorKind::Config,
            IoflowError::Logging(_) => ErrorKind::Logging,
            IoflowError::ReleaseAfterFailure { .. } => ErrorKind::ReleaseAfterFailure,
            IoflowError::Io(e) if is_transport_failure(e) => ErrorKind::TransportError,
            IoflowError::Io(e) => classify_io(e.kind()),
        }
    }

    /// Wrap any configuration parsing failure.
    pub fn config<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        IoflowError::Config(error.into())
    }
}

fn is_transport_failure(error: &io::Error) -> bool {
    error
        .get_ref()
        .is_some_and(|inner| inner.is::<TransportFailure>())
}

fn classify_io(kind: io::ErrorKind) -> ErrorKind {
    match kind {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::AddrNotAvailable
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::TimedOut => ErrorKind::TransportError,
        _ => ErrorKind::Io,
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
