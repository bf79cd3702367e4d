//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{ErrorKind, IoflowError};

/// A diagnostic wrapper for ioflow errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct IoDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(kind: ErrorKind) -> Option<&'static str> {
    let help = match kind {
        ErrorKind::UnsupportedEndpointKind => "set `iotype` to one of: file, url, string",
        ErrorKind::MissingIdentifier => "file and url endpoints need a path or URL",
        ErrorKind::NotFound => "check that the path or URL exists",
        ErrorKind::PermissionDenied => "check the permissions of the path or remote credentials",
        ErrorKind::DecodeError => "check the `encoding` setting, or open in binary mode ('rb')",
        ErrorKind::UnknownEncoding => "use an encoding label such as utf-8, latin1 or utf-16le",
        ErrorKind::InvalidMode => "use a mode like r, rb, w, wb, a or r+",
        ErrorKind::UnsupportedScheme => "register a filesystem for this scheme",
        ErrorKind::ResourceNotOpen => "open the endpoint before reading, writing or closing it",
        ErrorKind::Template => "template data must be a mapping and the template path must exist",
        _ => return None,
    };
    Some(help)
}

impl From<IoflowError> for IoDiagnostic {
    fn from(e: IoflowError) -> Self {
        let kind = e.kind();
        IoDiagnostic {
            message: format!("[{kind}] {e}"),
            help: help_for(kind).map(str::to_string),
            source: Some(Box::new(e)),
            severity: Severity::Error,
        }
    }
}

impl From<IoflowError> for miette::Report {
    fn from(e: IoflowError) -> Self {
        miette::Report::new(IoDiagnostic::from(e))
    }
}
