// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// In-memory filesystem holding only what the oracle looks at: which paths
/// exist and their modification times.
///
/// Clones share state, so a test can hand one clone to a task body (which
/// "writes" outputs via [`MockFileSystem::touch`]) and another to the runner.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, SystemTime>>>,
    clock: Arc<Mutex<u64>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for building timestamps in tests: `UNIX_EPOCH + secs`.
    pub fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    /// Create or update `path` with an explicit modification time.
    pub fn add_file(&self, path: impl AsRef<Path>, modified: SystemTime) {
        let mut files = self.files.lock().unwrap();
        files.insert(path.as_ref().to_path_buf(), modified);
    }

    /// Create or update `path` with a time strictly later than any previous
    /// `touch`, mimicking a freshly written file.
    pub fn touch(&self, path: impl AsRef<Path>) -> SystemTime {
        let now = {
            let mut clock = self.clock.lock().unwrap();
            let latest = self
                .files
                .lock()
                .unwrap()
                .values()
                .filter_map(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .max()
                .unwrap_or(0);
            *clock = (*clock).max(latest) + 1;
            Self::at(*clock)
        };
        self.add_file(path, now);
        now
    }

    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        let mut files = self.files.lock().unwrap();
        files.remove(path.as_ref()).is_some()
    }

    /// Snapshot of every path and its modification time.
    pub fn snapshot(&self) -> HashMap<PathBuf, SystemTime> {
        self.files.lock().unwrap().clone()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(path)
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        let files = self.files.lock().unwrap();
        files
            .get(path)
            .copied()
            .ok_or_else(|| anyhow!("File not found: {:?}", path))
    }
}
