//! Durable media the record store persists its document through.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Whole-document storage: the store always reads and writes the full byte image.
pub trait DurableMedium: Send + Sync {
    /// Returns `Ok(None)` when nothing has been persisted yet.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replaces the stored document. Must not return before the bytes are durable.
    fn write(&self, bytes: &[u8]) -> io::Result<()>;

    /// Human-readable location, used in errors and logs.
    fn location(&self) -> String;
}

/// A single JSON file on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileMedium {
    path: PathBuf,
}

impl JsonFileMedium {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl DurableMedium for JsonFileMedium {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write a sibling file and rename it over the target so readers never see a torn document.
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Default)]
struct MemoryInner {
    bytes: Mutex<Option<Vec<u8>>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

/// In-process medium. Clones share the same document, so a store can be
/// "restarted" against it. Writes can be made to fail on demand.
#[derive(Clone, Default)]
pub struct MemoryMedium {
    inner: Arc<MemoryInner>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `bytes` already persisted.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        let medium = Self::default();
        if let Ok(mut slot) = medium.inner.bytes.lock() {
            *slot = Some(bytes.into());
        }
        medium
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.inner.bytes.lock().ok().and_then(|slot| slot.clone())
    }
}

impl DurableMedium for MemoryMedium {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        let slot = self
            .inner
            .bytes
            .lock()
            .map_err(|_| io::Error::other("memory medium lock poisoned"))?;
        Ok(slot.clone())
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::other("simulated write failure"));
        }
        let mut slot = self
            .inner
            .bytes
            .lock()
            .map_err(|_| io::Error::other("memory medium lock poisoned"))?;
        *slot = Some(bytes.to_vec());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
