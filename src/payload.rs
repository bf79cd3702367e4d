//! Values moved from input endpoints to output endpoints.

use serde_json::Value;

/// Contents read from an input endpoint or rendered for an output endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Decoded text (text-mode endpoints)
    Text(String),
    /// Raw bytes (binary-mode endpoints)
    Bytes(Vec<u8>),
    /// Structured data, e.g. decoded JSON used as template variables
    Data(Value),
}

impl Payload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Payload::Data(value) => Some(value),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text",
            Payload::Bytes(_) => "bytes",
            Payload::Data(Value::Object(_)) => "mapping",
            Payload::Data(_) => "non-mapping data",
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Data(value)
    }
}
