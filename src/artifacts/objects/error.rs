use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Error type for object database operations
///
/// The object layer never recovers internally: any inconsistency between the
/// declared and actual payload, or any malformed entry, surfaces immediately
/// as `CorruptObject`. Translating these into user-facing messages is the
/// caller's job.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("corrupt object: {0}")]
    CorruptObject(String),

    #[error("invalid object id: {0}")]
    InvalidId(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Helper to wrap io errors with path context
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T, ObjectError>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T, ObjectError> {
        self.map_err(|source| ObjectError::Io {
            path: path.into(),
            source,
        })
    }
}
