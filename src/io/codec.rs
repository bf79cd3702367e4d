//! Text codecs for text-mode endpoints.

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::IoflowError;

/// A named text encoding resolved from an `encoding` configuration value.
///
/// Decoding is strict: malformed input is an error, never replaced.
/// `ascii` and `latin1` are the strict 7-bit and 8-bit code pages;
/// every other label resolves through its WHATWG definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    scheme: Scheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    Ascii,
    Latin1,
    Whatwg(&'static Encoding),
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            scheme: Scheme::Whatwg(UTF_8),
        }
    }
}

impl Codec {
    /// Resolve an encoding label (`utf-8`, `utf_8`, `latin1`, `utf-16le`, ...).
    pub fn for_label(label: &str) -> Result<Self, IoflowError> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        let scheme = match normalized.as_str() {
            "ascii" | "us-ascii" | "646" => Scheme::Ascii,
            "latin1" | "latin-1" | "l1" | "iso-8859-1" | "iso8859-1" => Scheme::Latin1,
            "utf-16-le" => Scheme::Whatwg(UTF_16LE),
            "utf-16-be" => Scheme::Whatwg(UTF_16BE),
            other => Encoding::for_label(other.as_bytes())
                .map(Scheme::Whatwg)
                .ok_or_else(|| IoflowError::UnknownEncoding(label.to_string()))?,
        };
        Ok(Self { scheme })
    }

    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        match self.scheme {
            Scheme::Ascii => "US-ASCII",
            Scheme::Latin1 => "ISO-8859-1",
            Scheme::Whatwg(encoding) => encoding.name(),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String, IoflowError> {
        let decoded: Option<String> = match self.scheme {
            Scheme::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().map(|&b| char::from(b)).collect()),
            Scheme::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            Scheme::Whatwg(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
        };
        decoded.ok_or(IoflowError::Decode {
            encoding: self.name(),
        })
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>, IoflowError> {
        let unmappable = IoflowError::Encode {
            encoding: self.name(),
        };
        match self.scheme {
            Scheme::Ascii if text.is_ascii() => Ok(text.as_bytes().to_vec()),
            Scheme::Ascii => Err(unmappable),
            Scheme::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c).ok())
                .collect::<Option<Vec<u8>>>()
                .ok_or(unmappable),
            // encoding_rs only decodes UTF-16; its encoder falls back to UTF-8.
            Scheme::Whatwg(encoding) if encoding == UTF_16LE => {
                Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect())
            }
            Scheme::Whatwg(encoding) if encoding == UTF_16BE => {
                Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect())
            }
            Scheme::Whatwg(encoding) => {
                let (bytes, _, had_unmappable) = encoding.encode(text);
                if had_unmappable {
                    return Err(unmappable);
                }
                Ok(bytes.into_owned())
            }
        }
    }
}
