use bytes::Bytes;
use std::path::{Path, PathBuf};

const IGNORED_PATHS: [&str; 3] = [".git", ".", ".."];

/// Working directory file system operations
///
/// All paths given to and returned from the workspace are relative to its
/// root. The repository's own control directory is never listed.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

/// Kind of a directory child, as far as tree building is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symbolic links and special files, which are not tracked
    Other,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the immediate children of a directory, as workspace-relative paths
    pub fn list_dir(&self, dir_path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let dir_path = self.path.join(dir_path);

        if !dir_path.is_dir() {
            anyhow::bail!("The specified path is not a directory: {:?}", dir_path);
        }

        Ok(std::fs::read_dir(&dir_path)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.check_if_not_ignored_path(&entry.path()))
            .collect::<Vec<_>>())
    }

    /// Classify a child without following symbolic links
    pub fn entry_kind(&self, file_path: &Path) -> anyhow::Result<EntryKind> {
        let metadata = std::fs::symlink_metadata(self.path.join(file_path))?;
        let file_type = metadata.file_type();

        if file_type.is_symlink() {
            Ok(EntryKind::Other)
        } else if file_type.is_dir() {
            Ok(EntryKind::Directory)
        } else if file_type.is_file() {
            Ok(EntryKind::File)
        } else {
            Ok(EntryKind::Other)
        }
    }

    /// Read a file's raw bytes, verbatim
    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(file_path)?;

        Ok(content.into())
    }

    fn is_ignored(path: &Path) -> bool {
        // Check if any component of the path is in IGNORED_PATHS
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_path(&self, path: &Path) -> Option<PathBuf> {
        if !Self::is_ignored(path) {
            Some(path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf())
        } else {
            None
        }
    }
}
