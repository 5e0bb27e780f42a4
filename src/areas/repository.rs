use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::storage::{FsStorage, Storage};
use crate::areas::workspace::Workspace;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the repository's control directory
pub const GIT_DIR: &str = ".git";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open (or prepare to initialize) a repository rooted at `path`
    ///
    /// Objects are persisted as loose files under `.git/objects`; the
    /// directory itself is created by `init`, not here.
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let storage = FsStorage::new(path.join(GIT_DIR).join("objects").into_boxed_path());
        Self::with_storage(path, writer, Box::new(storage))
    }

    /// Open a repository over an explicit storage backend
    pub fn with_storage(
        path: PathBuf,
        writer: Box<dyn std::io::Write>,
        storage: Box<dyn Storage>,
    ) -> anyhow::Result<Self> {
        let database = Database::new(storage);
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(GIT_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(GIT_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
