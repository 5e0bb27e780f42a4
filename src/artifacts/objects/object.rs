use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::error::ObjectError;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

pub trait Packable {
    /// Serialize to the full on-disk buffer: `<type> <size>\0<payload>`
    fn serialize(&self) -> Result<Bytes, ObjectError>;
}

pub trait Unpackable {
    /// Deserialize from a payload reader; the header has already been consumed
    /// and its declared size validated against the remaining bytes.
    fn deserialize(reader: impl BufRead) -> Result<Self, ObjectError>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    /// Content-derived identifier: SHA-1 over the serialized buffer
    ///
    /// Pure function of the object's bytes, no I/O. Identical payload and
    /// type always produce the same identifier.
    fn object_id(&self) -> Result<ObjectId, ObjectError> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    fn object_path(&self) -> Result<PathBuf, ObjectError> {
        Ok(self.object_id()?.to_path())
    }
}

#[derive(Debug)]
pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}
