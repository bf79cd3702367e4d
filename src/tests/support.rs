//! Filesystems and streams shared by the tests.

use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex};

use crate::io::{
    BackendOptions, Filesystem, FilesystemRegistry, OpenMode, ResourceStream, StringBuffer,
};

/// Serves the same body for every URL.
#[derive(Debug)]
pub struct CannedFilesystem {
    pub body: &'static str,
}

impl Filesystem for CannedFilesystem {
    fn open(&self, _url: &str, _mode: &OpenMode) -> io::Result<Box<dyn ResourceStream>> {
        Ok(Box::new(StringBuffer::new(self.body.as_bytes().to_vec())))
    }
}

/// Registry with a single scheme backed by a canned body.
pub fn canned_registry(scheme: &str, body: &'static str) -> Arc<FilesystemRegistry> {
    let filesystem = Arc::new(CannedFilesystem { body });
    Arc::new(FilesystemRegistry::new().with_filesystem(scheme, filesystem))
}

/// Stream whose release always fails.
#[derive(Debug, Default)]
pub struct BrokenCloseStream {
    cursor: Cursor<Vec<u8>>,
}

impl Read for BrokenCloseStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Write for BrokenCloseStream {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.cursor.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResourceStream for BrokenCloseStream {
    fn close(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "connection dropped on close",
        ))
    }
}

#[derive(Debug)]
pub struct BrokenCloseFilesystem;

impl Filesystem for BrokenCloseFilesystem {
    fn open(&self, _url: &str, _mode: &OpenMode) -> io::Result<Box<dyn ResourceStream>> {
        Ok(Box::new(BrokenCloseStream::default()))
    }
}

pub fn broken_close_registry() -> Arc<FilesystemRegistry> {
    Arc::new(FilesystemRegistry::new().with_filesystem("mock", Arc::new(BrokenCloseFilesystem)))
}

/// Registry whose `mock` factory records the backend options it was built with.
pub fn recording_registry() -> (Arc<FilesystemRegistry>, Arc<Mutex<Option<BackendOptions>>>) {
    let seen = Arc::new(Mutex::new(None));
    let captured = seen.clone();
    let mut registry = FilesystemRegistry::new();
    registry.register("mock", move |options| {
        *captured.lock().unwrap() = Some(options.clone());
        Ok(Arc::new(CannedFilesystem { body: "" }) as Arc<dyn Filesystem>)
    });
    (Arc::new(registry), seen)
}
