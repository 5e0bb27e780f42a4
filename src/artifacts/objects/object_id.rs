//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings representing SHA-1 hashes.
//! They uniquely identify all objects (blobs, trees, commits).
//!
//! ## Storage
//!
//! Objects are stored in `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::error::ObjectError;
use crate::artifacts::objects::{OBJECT_ID_LENGTH, RAW_OBJECT_ID_LENGTH};
use std::io::Read;
use std::path::PathBuf;

/// Git object identifier (SHA-1 hash)
///
/// A 40-character lowercase hexadecimal string that uniquely identifies an
/// object. Implements various utilities for parsing, serialization, and path
/// conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or `InvalidId` if length/characters are wrong
    pub fn try_parse(id: String) -> Result<Self, ObjectError> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(ObjectError::InvalidId(id));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ObjectError::InvalidId(id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Write the object ID in binary format (20 bytes)
    ///
    /// Converts the 40-char hex string to 20 raw bytes and appends them to the
    /// given buffer. Used when serializing tree entries.
    pub fn write_raw_to(&self, out: &mut Vec<u8>) {
        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            // cannot fail: try_parse only accepts hex digits
            let byte = u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or_default();
            out.push(byte);
        }
    }

    /// Read an object ID from binary format (20 bytes)
    ///
    /// Reads exactly 20 bytes and converts them to a 40-character hex string.
    /// Used when deserializing tree entries; fewer than 20 bytes remaining is
    /// a `CorruptObject` error.
    pub fn read_raw_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, ObjectError> {
        let mut buffer = [0; RAW_OBJECT_ID_LENGTH];
        reader
            .read_exact(&mut buffer)
            .map_err(|_| ObjectError::CorruptObject("truncated object id".to_string()))?;

        let mut hex40 = String::with_capacity(OBJECT_ID_LENGTH);
        for byte in buffer {
            hex40.push_str(&format!("{byte:02x}"));
        }

        Self::try_parse(hex40)
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
