//! Persistence backends for the object database
//!
//! The object database addresses its files by digest-derived relative paths
//! (`<2-hex>/<38-hex>`); backends only move bytes at those paths. Two
//! implementations are provided:
//!
//! - [`FsStorage`]: loose object files under `.git/objects`
//! - [`MemoryStorage`]: `HashMap`-backed store for tests and embedding

use crate::artifacts::objects::error::{IoResultExt, ObjectError};
use bytes::Bytes;
use derive_new::new;
use fake::rand;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Storage backend for compressed object files
///
/// Implementations must satisfy two invariants:
/// - files are immutable once written (content-addressing guarantees that the
///   same path always carries the same bytes)
/// - `write` is idempotent and never fails because the file, or its parent
///   directory, already exists
pub trait Storage: std::fmt::Debug {
    /// Check whether a file exists at the given relative path
    fn contains(&self, path: &Path) -> bool;

    /// Read the file at the given relative path
    fn read(&self, path: &Path) -> Result<Bytes, ObjectError>;

    /// Write a file at the given relative path, creating parent directories
    fn write(&self, path: &Path, content: Bytes) -> Result<(), ObjectError>;
}

/// Loose object files under a root directory
#[derive(Debug, new)]
pub struct FsStorage {
    root: Box<Path>,
}

impl Storage for FsStorage {
    fn contains(&self, path: &Path) -> bool {
        self.root.join(path).exists()
    }

    fn read(&self, path: &Path) -> Result<Bytes, ObjectError> {
        let path = self.root.join(path);
        let content = std::fs::read(&path).with_path(&path)?;

        Ok(content.into())
    }

    fn write(&self, path: &Path, content: Bytes) -> Result<(), ObjectError> {
        let path = self.root.join(path);
        let dir = path.parent().ok_or_else(|| ObjectError::Io {
            path: path.clone(),
            source: std::io::Error::from(std::io::ErrorKind::InvalidInput),
        })?;

        // tolerate the directory already existing (concurrent writers race here)
        std::fs::create_dir_all(dir).with_path(dir)?;

        // write to a temp file and rename into place to make the write atomic
        let temp_path = dir.join(Self::generate_temp_name());
        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_path(&temp_path)?;

        file.write_all(&content).with_path(&temp_path)?;

        std::fs::rename(&temp_path, &path).with_path(&path)?;

        Ok(())
    }
}

impl FsStorage {
    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

/// In-memory, `HashMap`-backed storage
///
/// Clones share the same underlying store, so a test can keep a handle while
/// the database owns another. The order of writes is recorded and exposed
/// through [`write_log`](MemoryStorage::write_log).
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<RwLock<HashMap<PathBuf, Bytes>>>,
    writes: Arc<RwLock<Vec<PathBuf>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files currently stored
    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().expect("lock poisoned").is_empty()
    }

    /// Paths in the order they were first written
    pub fn write_log(&self) -> Vec<PathBuf> {
        self.writes.read().expect("lock poisoned").clone()
    }
}

impl Storage for MemoryStorage {
    fn contains(&self, path: &Path) -> bool {
        self.files.read().expect("lock poisoned").contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<Bytes, ObjectError> {
        self.files
            .read()
            .expect("lock poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| ObjectError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }

    fn write(&self, path: &Path, content: Bytes) -> Result<(), ObjectError> {
        let mut files = self.files.write().expect("lock poisoned");
        if files.insert(path.to_path_buf(), content).is_none() {
            self.writes
                .write()
                .expect("lock poisoned")
                .push(path.to_path_buf());
        }

        Ok(())
    }
}
