//! Read-only HTTP(S) filesystem.
//!
//! Recognised backend options:
//! - `timeout_secs`: overall request timeout (number)
//! - `headers`: mapping of header names to string values

use std::io::{self, Cursor, Read, Write};
use std::time::Duration;

use super::{BackendOptions, Filesystem, OpenMode, ResourceStream, transport_error};

#[derive(Debug, Clone)]
pub struct HttpFilesystem {
    agent: ureq::Agent,
    headers: Vec<(String, String)>,
}

impl HttpFilesystem {
    /// Build a client from backend options.
    pub fn from_options(options: &BackendOptions) -> io::Result<Self> {
        let mut builder = ureq::AgentBuilder::new();

        if let Some(timeout) = options.get("timeout_secs") {
            let secs = timeout
                .as_f64()
                .filter(|s| s.is_finite() && *s >= 0.0)
                .ok_or_else(|| invalid_option("timeout_secs must be a non-negative number"))?;
            builder = builder.timeout(Duration::from_secs_f64(secs));
        }

        let mut headers = Vec::new();
        if let Some(map) = options.get("headers") {
            let map = map
                .as_object()
                .ok_or_else(|| invalid_option("headers must be a mapping"))?;
            for (name, value) in map {
                let value = value
                    .as_str()
                    .ok_or_else(|| invalid_option("header values must be strings"))?;
                headers.push((name.clone(), value.to_string()));
            }
        }

        Ok(Self {
            agent: builder.build(),
            headers,
        })
    }
}

fn invalid_option(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.to_string())
}

fn into_io_error(url: &str, err: ureq::Error) -> io::Error {
    match err {
        ureq::Error::Status(code, _) => status_error(url, code),
        ureq::Error::Transport(transport) => transport_error(format!("{url}: {transport}")),
    }
}

/// Map an unsuccessful HTTP status to an I/O error.
///
/// Server-side failures (5xx) are transport failures.
pub(crate) fn status_error(url: &str, code: u16) -> io::Error {
    let message = format!("{url}: http status {code}");
    let kind = match code {
        404 | 410 => io::ErrorKind::NotFound,
        401 | 403 => io::ErrorKind::PermissionDenied,
        408 => io::ErrorKind::TimedOut,
        500..=599 => return transport_error(message),
        _ => io::ErrorKind::Other,
    };
    io::Error::new(kind, message)
}

impl Filesystem for HttpFilesystem {
    fn open(&self, url: &str, mode: &OpenMode) -> io::Result<Box<dyn ResourceStream>> {
        if mode.write {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "http filesystem is read-only",
            ));
        }

        let mut request = self.agent.get(url);
        for (name, value) in &self.headers {
            request = request.set(name, value);
        }

        let response = request.call().map_err(|e| into_io_error(url, e))?;
        let mut body = Vec::new();
        response.into_reader().read_to_end(&mut body)?;
        tracing::trace!(url, bytes = body.len(), "fetched http body");

        Ok(Box::new(HttpBody {
            body: Cursor::new(body),
        }))
    }
}

#[derive(Debug)]
struct HttpBody {
    body: Cursor<Vec<u8>>,
}

impl Read for HttpBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

impl Write for HttpBody {
    fn write(&mut self, _data: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "http response bodies are read-only",
        ))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResourceStream for HttpBody {}
