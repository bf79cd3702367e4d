//! In-memory streams: the string endpoint buffer and the `memory://` filesystem.

use std::collections::HashMap;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Filesystem, OpenMode, ResourceStream};

/// In-memory text buffer backing a string endpoint.
///
/// Starts positioned at the beginning of its initial contents; writes
/// overwrite from the current position.
#[derive(Debug, Clone, Default)]
pub struct StringBuffer {
    cursor: Cursor<Vec<u8>>,
}

impl StringBuffer {
    /// Create a buffer holding the given bytes.
    pub fn new(initial: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(initial),
        }
    }

    /// Get the full contents of the buffer.
    pub fn contents(&self) -> &[u8] {
        self.cursor.get_ref()
    }
}

impl Read for StringBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Write for StringBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.cursor.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResourceStream for StringBuffer {}

type Store = Arc<Mutex<HashMap<String, Vec<u8>>>>;

/// Filesystem for `memory://` URLs.
///
/// Clones share the same store, so content written through one endpoint is
/// visible to any later endpoint opened on the same registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    store: Store,
}

impl MemoryFilesystem {
    /// Create a new empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stored contents for a URL or key.
    pub fn contents(&self, url: &str) -> Option<Vec<u8>> {
        lock(&self.store).ok()?.get(&key_for(url)).cloned()
    }

    /// Store contents directly under a URL or key.
    pub fn insert(&self, url: &str, data: impl Into<Vec<u8>>) -> io::Result<()> {
        lock(&self.store)?.insert(key_for(url), data.into());
        Ok(())
    }

    /// Remove every stored entry.
    pub fn clear(&self) -> io::Result<()> {
        lock(&self.store)?.clear();
        Ok(())
    }
}

fn lock(store: &Store) -> io::Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
    store
        .lock()
        .map_err(|_| io::Error::other("memory filesystem store is poisoned"))
}

fn key_for(url: &str) -> String {
    url.strip_prefix("memory://")
        .or_else(|| url.strip_prefix("memory:"))
        .unwrap_or(url)
        .trim_start_matches('/')
        .to_string()
}

impl Filesystem for MemoryFilesystem {
    fn open(&self, url: &str, mode: &OpenMode) -> io::Result<Box<dyn ResourceStream>> {
        let key = key_for(url);
        let mut entries = lock(&self.store)?;

        let existing = entries.get(&key).cloned();
        if mode.exclusive && existing.is_some() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("memory://{key} already exists"),
            ));
        }

        let initial = match existing {
            Some(data) if !mode.truncate => data,
            Some(_) => Vec::new(),
            None if mode.write && (mode.truncate || mode.append || mode.exclusive) => Vec::new(),
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("memory://{key} does not exist"),
                ));
            }
        };

        if mode.write {
            entries.insert(key.clone(), initial.clone());
        }

        let mut cursor = Cursor::new(initial);
        if mode.append {
            cursor.seek(SeekFrom::End(0))?;
        }

        Ok(Box::new(MemoryFile {
            store: self.store.clone(),
            key,
            cursor,
            writable: mode.write,
            append: mode.append,
        }))
    }
}

/// Stream handle for a `memory://` entry.
///
/// Written bytes are committed to the shared store on flush and close.
struct MemoryFile {
    store: Store,
    key: String,
    cursor: Cursor<Vec<u8>>,
    writable: bool,
    append: bool,
}

impl std::fmt::Debug for MemoryFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryFile")
            .field("key", &self.key)
            .field("writable", &self.writable)
            .finish()
    }
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Write for MemoryFile {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if !self.writable {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "memory entry was not opened for writing",
            ));
        }
        if self.append {
            self.cursor.seek(SeekFrom::End(0))?;
        }
        self.cursor.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.writable {
            lock(&self.store)?.insert(self.key.clone(), self.cursor.get_ref().clone());
        }
        Ok(())
    }
}

impl ResourceStream for MemoryFile {}
