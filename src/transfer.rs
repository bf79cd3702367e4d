//! Transfer steps: read one endpoint, write another.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ProcessorSpec;
use crate::endpoint::{InputEndpoint, OutputEndpoint, scoped};
use crate::error::IoflowError;
use crate::payload::Payload;

/// One input-to-output transfer.
pub trait TransferStep: Send {
    /// Read `reader` fully inside a scope, then write the value through
    /// `writer` inside a scope.
    fn process(
        &mut self,
        reader: &mut dyn InputEndpoint,
        writer: &mut dyn OutputEndpoint,
    ) -> Result<(), IoflowError>;

    /// The value handed to the writer by the last transfer.
    fn input(&self) -> Option<&Payload>;

    /// The writer's output from the last transfer.
    fn output(&self) -> Option<&Payload>;
}

/// Copies the input to the output unchanged.
#[derive(Debug, Clone, Default)]
pub struct PassThrough {
    input: Option<Payload>,
    output: Option<Payload>,
}

impl PassThrough {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransferStep for PassThrough {
    fn process(
        &mut self,
        reader: &mut dyn InputEndpoint,
        writer: &mut dyn OutputEndpoint,
    ) -> Result<(), IoflowError> {
        let input = scoped(reader, |r| r.read().cloned())?;
        self.input = Some(input.clone());

        let output = scoped(writer, |w| w.write(input).cloned())?;
        self.output = Some(output);
        Ok(())
    }

    fn input(&self) -> Option<&Payload> {
        self.input.as_ref()
    }

    fn output(&self) -> Option<&Payload> {
        self.output.as_ref()
    }
}

/// Structured formats a [`Decode`] step understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFormat {
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
}

impl fmt::Display for DecodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeFormat::Json => write!(f, "json"),
            #[cfg(feature = "yaml")]
            DecodeFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for DecodeFormat {
    type Err = IoflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DecodeFormat::Json),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(DecodeFormat::Yaml),
            other => Err(IoflowError::config(format!("unknown decode format '{other}'"))),
        }
    }
}

impl DecodeFormat {
    fn decode(&self, payload: Payload) -> Result<Value, IoflowError> {
        match (self, payload) {
            (_, Payload::Data(value)) => Ok(value),
            (DecodeFormat::Json, Payload::Text(text)) => Ok(serde_json::from_str(&text)?),
            (DecodeFormat::Json, Payload::Bytes(bytes)) => Ok(serde_json::from_slice(&bytes)?),
            #[cfg(feature = "yaml")]
            (DecodeFormat::Yaml, Payload::Text(text)) => Ok(serde_yaml::from_str(&text)?),
            #[cfg(feature = "yaml")]
            (DecodeFormat::Yaml, Payload::Bytes(bytes)) => Ok(serde_yaml::from_slice(&bytes)?),
        }
    }
}

/// Parses the input as structured data before writing it.
///
/// Pairs with a writer template: the decoded mapping becomes the template
/// variables.
#[derive(Debug, Clone)]
pub struct Decode {
    format: DecodeFormat,
    input: Option<Payload>,
    output: Option<Payload>,
}

impl Decode {
    pub fn new(format: DecodeFormat) -> Self {
        Self {
            format,
            input: None,
            output: None,
        }
    }

    pub fn format(&self) -> DecodeFormat {
        self.format
    }
}

impl TransferStep for Decode {
    fn process(
        &mut self,
        reader: &mut dyn InputEndpoint,
        writer: &mut dyn OutputEndpoint,
    ) -> Result<(), IoflowError> {
        let raw = scoped(reader, |r| r.read().cloned())?;
        let decoded = Payload::Data(self.format.decode(raw)?);
        debug!(format = %self.format, "decoded input");
        self.input = Some(decoded.clone());

        let output = scoped(writer, |w| w.write(decoded).cloned())?;
        self.output = Some(output);
        Ok(())
    }

    fn input(&self) -> Option<&Payload> {
        self.input.as_ref()
    }

    fn output(&self) -> Option<&Payload> {
        self.output.as_ref()
    }
}

/// Settings read from the `processor` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProcessorConfig {
    /// Decode the input as this format before writing
    #[serde(default)]
    pub decode: Option<String>,
}

impl ProcessorConfig {
    pub fn from_section(section: Option<&Value>) -> Result<Self, IoflowError> {
        match section {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => Self::deserialize(value).map_err(IoflowError::config),
        }
    }
}

/// Build the transfer step named by a processor spec.
///
/// `decode` selects [`Decode`]; otherwise the step is [`PassThrough`].
pub fn default_processor(spec: ProcessorSpec) -> Result<Box<dyn TransferStep>, IoflowError> {
    let config = ProcessorConfig::from_section(spec.section.as_ref())?;
    match config.decode.as_deref() {
        Some(format) => Ok(Box::new(Decode::new(format.parse()?))),
        None => Ok(Box::new(PassThrough::new())),
    }
}
