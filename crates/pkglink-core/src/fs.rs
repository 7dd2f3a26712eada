//! Filesystem access seam.
//!
//! Homepage resolution only needs two read-only primitives: listing the entry
//! names of a directory and reading a text file. Both go through the
//! [`FileSystem`] trait so resolution can run against the real disk
//! ([`LocalFileSystem`]) or an in-memory tree ([`MemoryFileSystem`]).

use crate::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};

/// Read-only filesystem operations used during link resolution.
///
/// # Examples
///
/// ```
/// use pkglink_core::fs::{FileSystem, MemoryFileSystem};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> pkglink_core::Result<()> {
/// let fs = MemoryFileSystem::new()
///     .with_file("/project/node_modules/react/package.json", "{}");
///
/// let entries = fs.read_dir(std::path::Path::new("/project/node_modules")).await?;
/// assert_eq!(entries, vec!["react".to_string()]);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Lists the names of the entries directly inside `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist or cannot be read.
    async fn read_dir(&self, path: &Path) -> Result<Vec<String>>;

    /// Reads the whole file at `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is not
    /// valid UTF-8.
    async fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// [`FileSystem`] backed by the local disk via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn read_dir(&self, path: &Path) -> Result<Vec<String>> {
        let mut dir = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            // Non UTF-8 names can never match a package name
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::trace!("skipping non UTF-8 entry {:?} in {}", raw, path.display());
                }
            }
        }
        Ok(names)
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

/// In-memory [`FileSystem`] holding a flat map of file paths to contents.
///
/// Directories exist implicitly as ancestors of stored files. Entry listings
/// are returned in sorted order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, returning the updated filesystem.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn read_dir(&self, path: &Path) -> Result<Vec<String>> {
        let names: BTreeSet<String> = self
            .files
            .keys()
            .filter_map(|file| file.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .filter_map(|first| first.as_os_str().to_str().map(String::from))
            .collect();

        if names.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            )
            .into());
        }

        Ok(names.into_iter().collect())
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
            .into()
        })
    }
}
