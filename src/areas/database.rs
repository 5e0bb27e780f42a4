use crate::areas::storage::Storage;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::error::ObjectError;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use std::io::{Cursor, Read, Write};

/// Content-addressable object database
///
/// Maps between an object's logical payload and its compressed on-disk
/// representation, keyed by content digest. Objects are write-once: a second
/// store of identical content is a no-op, and nothing is ever updated or
/// deleted.
// TODO: pack loose objects for better storage efficiency on large histories
#[derive(Debug)]
pub struct Database {
    storage: Box<dyn Storage>,
}

impl Database {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Database { storage }
    }

    /// Persist an object and return its content digest
    ///
    /// The write is skipped when an object file already exists at the derived
    /// path: by the hash guarantee its content is identical.
    pub fn store(&self, object: impl Object) -> Result<ObjectId, ObjectError> {
        let object_id = object.object_id()?;
        let object_path = object_id.to_path();

        if !self.storage.contains(&object_path) {
            let object_content = Self::compress(object.serialize()?)
                .map_err(|source| ObjectError::Io {
                    path: object_path.clone(),
                    source,
                })?;
            self.storage.write(&object_path, object_content)?;
        }

        Ok(object_id)
    }

    /// Load and decompress the full `<type> <size>\0<payload>` buffer
    ///
    /// Fails with `ObjectNotFound` when no file exists at the derived path
    /// and with `CorruptObject` when the stored bytes are not a valid zlib
    /// stream.
    pub fn load(&self, object_id: &ObjectId) -> Result<Bytes, ObjectError> {
        let object_path = object_id.to_path();

        if !self.storage.contains(&object_path) {
            return Err(ObjectError::ObjectNotFound(object_id.clone()));
        }

        let object_content = self.storage.read(&object_path)?;
        Self::decompress(object_content)
    }

    /// Load an object and decode it based on its declared type tag
    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox, ObjectError> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
        }
    }

    /// Load an object as a tree, or `None` when it is of another type
    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Option<Tree>, ObjectError> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tree => Ok(Some(Tree::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Load an object as a commit, or `None` when it is of another type
    pub fn parse_object_as_commit(
        &self,
        object_id: &ObjectId,
    ) -> Result<Option<Commit>, ObjectError> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> Result<(ObjectType, Cursor<Bytes>), ObjectError> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, declared_size) = ObjectType::parse_header(&mut object_reader)?;

        // the declared length must match the actual payload length exactly
        let remaining = object_reader.get_ref().len() as u64 - object_reader.position();
        if declared_size as u64 != remaining {
            return Err(ObjectError::CorruptObject(format!(
                "declared size {declared_size} does not match payload size {remaining}"
            )));
        }

        Ok((object_type, object_reader))
    }

    fn compress(data: Bytes) -> std::io::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&data)?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
    }

    fn decompress(data: Bytes) -> Result<Bytes, ObjectError> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .map_err(|e| ObjectError::CorruptObject(format!("invalid zlib stream: {e}")))?;

        Ok(decompressed_content.into())
    }
}
