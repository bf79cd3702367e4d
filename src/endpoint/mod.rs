//! Endpoints: the input and output sides of a workflow.
//!
//! This module provides:
//! - `EndpointHandle`: Uniform open/close over file, url and string backends
//! - `Endpoint`: The shared lifecycle of input and output endpoints
//! - `InputEndpoint` / `Reader`: Whole-content reads, default mode `r`
//! - `OutputEndpoint` / `Writer`: Render and write, default mode `w`
//! - `scoped`: Open, run a body, always close
//!
//! Configuration precedence when opening, highest first: explicit
//! [`OpenRequest`] fields, the endpoint's current configuration, then the
//! endpoint's default mode.

mod handle;
mod input;
mod kind;
mod output;
mod scope;

use std::path::PathBuf;

pub use handle::{EndpointHandle, OpenRequest, OpenResource, ResolvedOptions};
pub use input::{InputEndpoint, Reader};
pub use kind::EndpointKind;
pub use output::{OutputEndpoint, Writer};
pub use scope::scoped;

use crate::error::IoflowError;

/// Built-in defaults of one endpoint instance.
///
/// Copied into each endpoint at construction, never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDefaults {
    /// Mode used when neither the open request nor the configuration has one
    pub mode: String,
    /// Template applied by `render` when none is passed
    pub template: Option<PathBuf>,
}

impl EndpointDefaults {
    pub fn reader() -> Self {
        Self {
            mode: "r".to_string(),
            template: None,
        }
    }

    pub fn writer() -> Self {
        Self {
            mode: "w".to_string(),
            template: None,
        }
    }
}

/// Lifecycle shared by input and output endpoints.
pub trait Endpoint: Send {
    fn handle(&self) -> &EndpointHandle;

    fn handle_mut(&mut self) -> &mut EndpointHandle;

    /// Mode used when neither the request nor the configuration sets one.
    fn default_mode(&self) -> &str;

    /// Open the endpoint, filling in the default mode.
    fn open(&mut self, mut request: OpenRequest) -> Result<(), IoflowError> {
        if request.mode.as_deref().is_none_or(str::is_empty) {
            let mode = match self.handle().config().mode.as_deref() {
                Some(mode) if !mode.is_empty() => mode.to_string(),
                _ => self.default_mode().to_string(),
            };
            request.mode = Some(mode);
        }
        self.handle_mut().open(request)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), IoflowError> {
        self.handle_mut().close()?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.handle().is_open()
    }
}
