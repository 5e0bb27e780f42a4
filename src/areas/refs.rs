//! Reference file management
//!
//! References are human-readable names pointing at commits, stored as text
//! files under `.git`. Only the scaffolding part is implemented here: the
//! object layer never touches references, and branch management is out of
//! scope. `HEAD` is written as a symbolic reference
//! (`ref: refs/heads/<branch>`).

use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Reference file writer rooted at the repository's control directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the control directory (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join("refs").join("heads").into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    /// Point HEAD at the given branch
    pub fn set_head(&self, branch: &str) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), format!("ref: refs/heads/{branch}\n"))
    }

    /// Overwrite a ref file under an exclusive lock
    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }
}
