//! # ioflow
//!
//! Configuration-driven input-to-output workflows over files, URLs and
//! in-memory strings.
//!
//! ## Overview
//!
//! ioflow provides:
//! - **Uniform endpoints**: One open/read/write/close lifecycle for `file`, `url` and `string` backends
//! - **Explicit precedence**: Open-time arguments, then configuration, then per-endpoint defaults
//! - **Scoped use**: Endpoints are always released, with both errors kept when body and release fail
//! - **Pluggable filesystems**: URL schemes resolve through a `FilesystemRegistry`
//! - **Templated output**: Writers can render structured data through minijinja templates
//! - **Workflows**: Reader, processor and writer built from named configuration sections
//!
//! ## Quick Start
//!
//! ```rust
//! use ioflow::{Payload, Workflow, WorkflowConfig};
//! use serde_json::json;
//!
//! fn main() -> Result<(), ioflow::IoflowError> {
//!     let config = WorkflowConfig::new()
//!         .with_section("reader", json!({"iotype": "string"}))
//!         .with_section("writer", json!({"iotype": "string"}));
//!
//!     let run = Workflow::new(config).run(Some("hello"), None)?;
//!     assert_eq!(run.output(), Some(&Payload::from("hello")));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `yaml` - YAML workflow configuration and the `ioflow-run` binary (enabled by default)
//! - `toml` - TOML workflow configuration
//! - `http` - Read-only `http`/`https` filesystems backed by ureq
//! - `miette` - Pretty error reporting with miette

// Core modules
pub mod config;
pub mod endpoint;
pub mod error;
pub mod io;
pub mod logging;
pub mod payload;
pub mod template;
pub mod transfer;
pub mod workflow;

// Re-exports for convenience
pub use config::{EndpointConfig, EndpointSpec, ProcessorSpec, WorkflowConfig};
pub use endpoint::{
    Endpoint, EndpointDefaults, EndpointHandle, EndpointKind, InputEndpoint, OpenRequest,
    OutputEndpoint, Reader, Writer, scoped,
};
pub use error::{ErrorKind, IoflowError};
pub use io::{
    Codec, Filesystem, FilesystemRegistry, MemoryFilesystem, OpenMode, ResourceStream,
    StringBuffer, default_filesystems,
};
pub use logging::{LogFormat, LoggerConfig};
pub use payload::Payload;
pub use transfer::{Decode, DecodeFormat, PassThrough, TransferStep, default_processor};
pub use workflow::{Workflow, WorkflowRun};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::IoDiagnostic;
