use std::fmt;
use std::str::FromStr;

use crate::error::IoflowError;

/// The backend an endpoint opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// Local file path
    File,
    /// URL opened through a registered filesystem
    Url,
    /// The identifier itself is the contents
    String,
}

impl EndpointKind {
    /// Parse a kind case-insensitively. `str` is accepted for `string`.
    pub fn parse(raw: &str) -> Result<Self, IoflowError> {
        match raw.to_ascii_lowercase().as_str() {
            "file" => Ok(EndpointKind::File),
            "url" => Ok(EndpointKind::Url),
            "string" | "str" => Ok(EndpointKind::String),
            _ => Err(IoflowError::UnsupportedEndpointKind(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::File => "file",
            EndpointKind::Url => "url",
            EndpointKind::String => "string",
        }
    }

    /// Whether the mode setting is forwarded to the backend.
    pub fn uses_mode(&self) -> bool {
        !matches!(self, EndpointKind::String)
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointKind {
    type Err = IoflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
