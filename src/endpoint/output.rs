use std::path::{Path, PathBuf};

use crate::config::{EndpointConfig, EndpointSpec};
use crate::error::IoflowError;
use crate::payload::Payload;

use super::{Endpoint, EndpointDefaults, EndpointHandle};

/// An endpoint that renders data and writes it.
pub trait OutputEndpoint: Endpoint {
    /// Produce the output for `data`.
    ///
    /// Without a template (passed or default) the output is `data` itself.
    /// The result is also kept as [`output`](Self::output).
    fn render(&mut self, data: Payload, template: Option<&Path>) -> Result<&Payload, IoflowError>;

    /// Render `data` with the default template and persist it to the open
    /// resource.
    fn write(&mut self, data: Payload) -> Result<&Payload, IoflowError>;

    /// The last rendered output.
    fn output(&self) -> Option<&Payload>;
}

/// The default output endpoint.
#[derive(Debug)]
pub struct Writer {
    handle: EndpointHandle,
    defaults: EndpointDefaults,
    output: Option<Payload>,
}

impl Writer {
    /// Create a writer; the config's `template` becomes the default template.
    pub fn new(handle: EndpointHandle) -> Self {
        let defaults = EndpointDefaults {
            template: handle.config().template.clone(),
            ..EndpointDefaults::writer()
        };
        Self {
            handle,
            defaults,
            output: None,
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

    pub fn with_default_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.defaults.template = Some(template.into());
        self
    }

    pub fn defaults(&self) -> &EndpointDefaults {
        &self.defaults
    }

    fn rendered(&self, data: Payload, template: Option<&Path>) -> Result<Payload, IoflowError> {
        let Some(template) = template.or(self.defaults.template.as_deref()) else {
            return Ok(data);
        };

        match &data {
            Payload::Data(value) => crate::template::render(template, value).map(Payload::Text),
            other => Err(IoflowError::TemplateContext(other.kind_name())),
        }
    }
}

impl Endpoint for Writer {
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

impl OutputEndpoint for Writer {
    fn render(&mut self, data: Payload, template: Option<&Path>) -> Result<&Payload, IoflowError> {
        let rendered = self.rendered(data, template)?;
        Ok(&*self.output.insert(rendered))
    }

    fn write(&mut self, data: Payload) -> Result<&Payload, IoflowError> {
        let rendered = self.rendered(data, None)?;
        let output = &*self.output.insert(rendered);
        self.handle.write_payload(output)?;
        Ok(output)
    }

    fn output(&self) -> Option<&Payload> {
        self.output.as_ref()
    }
}
