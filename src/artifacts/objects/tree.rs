//! Git tree object
//!
//! Trees represent directory snapshots. They contain entries for files
//! (blobs) and subdirectories (other trees), along with their names and
//! modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! ## Entry ordering
//!
//! Entries are keyed with a trailing `/` on directory names, so the map
//! iterates in git's canonical order: raw byte order with directories
//! compared as if their name were suffixed by `/`. Semantically identical
//! directory contents therefore always hash to the same tree identifier.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::error::ObjectError;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Git tree object representing a directory snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    /// Entries keyed by name, directory names suffixed with '/'
    entries: BTreeMap<String, DatabaseEntry>,
}

impl Tree {
    /// Record a regular file entry
    pub fn add_file(&mut self, name: &str, oid: ObjectId) {
        self.entries.insert(
            name.to_string(),
            DatabaseEntry::new(oid, EntryMode::File(FileMode::Regular)),
        );
    }

    /// Record a subdirectory entry
    pub fn add_directory(&mut self, name: &str, oid: ObjectId) {
        self.entries
            .insert(format!("{name}/"), DatabaseEntry::new(oid, EntryMode::Directory));
    }

    /// Iterate entries in canonical order, names without the '/' suffix
    pub fn entries(&self) -> impl Iterator<Item = (&str, &DatabaseEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.trim_end_matches('/'), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes, ObjectError> {
        let mut content_bytes = Vec::new();
        for (name, entry) in self.entries() {
            let header = format!("{:o} {}", entry.mode.as_u32(), name);
            content_bytes.extend_from_slice(header.as_bytes());
            content_bytes.push(0);
            entry.oid.write_raw_to(&mut content_bytes);
        }

        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        let mut tree_bytes = Vec::with_capacity(header.len() + content_bytes.len());
        tree_bytes.extend_from_slice(header.as_bytes());
        tree_bytes.extend_from_slice(&content_bytes);

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> Result<Self, ObjectError> {
        let mut entries = BTreeMap::new();

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader
                .read_until(b' ', &mut mode_bytes)
                .map_err(|e| ObjectError::CorruptObject(format!("unreadable tree entry: {e}")))?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(ObjectError::CorruptObject(
                    "unexpected EOF in tree entry mode".to_string(),
                ));
            }

            let mode_str = std::str::from_utf8(&mode_bytes)
                .map_err(|_| ObjectError::CorruptObject("non-utf8 tree entry mode".to_string()))?;
            let mode = EntryMode::from_octal_str(mode_str)?;

            // Read "name\0"
            name_bytes.clear();
            let n = reader
                .read_until(b'\0', &mut name_bytes)
                .map_err(|e| ObjectError::CorruptObject(format!("unreadable tree entry: {e}")))?;
            if n == 0 || name_bytes.pop() != Some(b'\0') {
                return Err(ObjectError::CorruptObject(
                    "unexpected EOF in tree entry name".to_string(),
                ));
            }
            let name = std::str::from_utf8(&name_bytes)
                .map_err(|_| ObjectError::CorruptObject("non-utf8 tree entry name".to_string()))?;

            // Read exactly 20 raw digest bytes; a truncated digest is an error
            let oid = ObjectId::read_raw_from(&mut reader)?;

            // Key directories with a trailing '/' to keep canonical order
            let key = if mode.is_tree() {
                format!("{name}/")
            } else {
                name.to_string()
            };
            entries.insert(key, DatabaseEntry::new(oid, mode));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries()
            .map(|(name, entry)| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.mode.object_type().as_str(),
                    entry.oid.as_ref(),
                    name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
