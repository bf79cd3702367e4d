//! The live stream behind an open endpoint.

use std::fmt::Debug;
use std::io::{self, Read, Write};

/// A readable/writable stream owned by an open endpoint.
///
/// Backends that only support one direction return an
/// `io::ErrorKind::Unsupported` error from the other.
pub trait ResourceStream: Read + Write + Send + Debug {
    /// Release the underlying resource.
    ///
    /// The default flushes pending writes; dropping the stream does the rest.
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl ResourceStream for std::fs::File {}
