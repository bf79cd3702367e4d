//! Backends behind endpoints.
//!
//! This module provides:
//! - `OpenMode`: Parsed open-mode strings
//! - `Codec`: Text encodings for text-mode endpoints
//! - `ResourceStream`: The live stream owned by an open endpoint
//! - Local file and in-memory implementations
//! - `Filesystem` / `FilesystemRegistry`: URL-scheme backends for url endpoints

mod codec;
mod file;
mod memory;
mod mode;
mod remote;
mod stream;

pub use codec::Codec;
pub use file::{LocalFilesystem, open_local};
pub use memory::{MemoryFilesystem, StringBuffer};
pub use mode::OpenMode;
pub use remote::{
    BackendOptions, Filesystem, FilesystemFactory, FilesystemRegistry, TransportFailure,
    default_filesystems, scheme_of, transport_error,
};
pub use stream::ResourceStream;

// HTTP support
#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpFilesystem;

#[cfg(all(test, feature = "http"))]
pub(crate) use http::status_error;
