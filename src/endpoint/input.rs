use crate::config::{EndpointConfig, EndpointSpec};
use crate::error::IoflowError;
use crate::payload::Payload;

use super::{Endpoint, EndpointDefaults, EndpointHandle};

/// An endpoint that reads its whole contents.
pub trait InputEndpoint: Endpoint {
    /// Read all remaining contents of the open resource.
    ///
    /// The result is also kept as [`input`](Self::input).
    fn read(&mut self) -> Result<&Payload, IoflowError>;

    /// The contents of the last successful read.
    fn input(&self) -> Option<&Payload>;
}

/// The default input endpoint.
#[derive(Debug)]
pub struct Reader {
    handle: EndpointHandle,
    defaults: EndpointDefaults,
    input: Option<Payload>,
}

impl Reader {
    pub fn new(handle: EndpointHandle) -> Self {
        Self {
            handle,
            defaults: EndpointDefaults::reader(),
            input: None,
        }
    }

    pub fn from_config(config: EndpointConfig) -> Self {
        Self::new(EndpointHandle::new(config))
    }

    pub fn from_spec(spec: EndpointSpec) -> Self {
        Self::new(EndpointHandle::from_spec(spec))
    }

    pub fn with_defaults(mut self, defaults: EndpointDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &EndpointDefaults {
        &self.defaults
    }
}

impl Endpoint for Reader {
    fn handle(&self) -> &EndpointHandle {
        &self.handle
    }

    fn handle_mut(&mut self) -> &mut EndpointHandle {
        &mut self.handle
    }

    fn default_mode(&self) -> &str {
        &self.defaults.mode
    }
}

impl InputEndpoint for Reader {
    fn read(&mut self) -> Result<&Payload, IoflowError> {
        let payload = self.handle.read_to_end()?;
        Ok(&*self.input.insert(payload))
    }

    fn input(&self) -> Option<&Payload> {
        self.input.as_ref()
    }
}
