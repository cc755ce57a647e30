// src/fs/mod.rs

//! Filesystem access used by the staleness oracle.
//!
//! The oracle only needs two questions answered about a path: does it exist,
//! and when was it last modified. Keeping that behind a trait lets tests use
//! [`mock::MockFileSystem`] with explicit timestamps instead of relying on the
//! mtime granularity of the host filesystem.

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn exists(&self, path: &Path) -> bool;

    /// Last-modified timestamp of an existing path.
    fn modified(&self, path: &Path) -> Result<SystemTime>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        (**self).modified(path)
    }
}

/// Implementation that uses `std::fs`.
///
/// Relative paths are resolved against `root` when one is set (task files
/// declare paths relative to their own directory); otherwise against the
/// process working directory.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem {
    root: Option<PathBuf>,
}

impl RealFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// The on-disk location of a declared path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        let resolved = self.resolve(path);
        fs::metadata(&resolved)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("reading modification time of {:?}", resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn rooted_filesystem_resolves_relative_paths_only() {
        let fs = RealFileSystem::rooted("/project");
        assert_eq!(fs.resolve(Path::new("out/a.o")), PathBuf::from("/project/out/a.o"));

        let absolute = std::env::temp_dir().join("x.txt");
        assert_eq!(fs.resolve(&absolute), absolute);
    }

    #[test]
    fn modified_of_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let fs = RealFileSystem::rooted(dir.path());
        assert!(!fs.exists(Path::new("nope.txt")));
        assert!(fs.modified(Path::new("nope.txt")).is_err());
    }
}
