//! Local filesystem backend.

use std::io;
use std::path::{Path, PathBuf};

use super::{Filesystem, OpenMode, ResourceStream};

/// Open a local path with the given mode.
pub fn open_local(path: &Path, mode: &OpenMode) -> io::Result<Box<dyn ResourceStream>> {
    let file = mode.to_open_options().open(path)?;
    Ok(Box::new(file))
}

/// Filesystem for `file://` URLs.
#[derive(Debug, Clone, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem.
    pub fn new() -> Self {
        Self
    }

    fn to_path(url: &str) -> io::Result<PathBuf> {
        let parsed = url::Url::parse(url)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        parsed.to_file_path().map_err(|()| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{url}' is not a local file URL"),
            )
        })
    }
}

impl Filesystem for LocalFilesystem {
    fn open(&self, url: &str, mode: &OpenMode) -> io::Result<Box<dyn ResourceStream>> {
        let path = Self::to_path(url)?;
        open_local(&path, mode)
    }
}
