use crate::artifacts::objects::error::ObjectError;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Parse the `<type> <size>\0` header of a decompressed object
    ///
    /// Scans to the first space for the type tag and to the first NUL for the
    /// declared payload size, leaving the reader positioned at the payload.
    pub fn parse_header(reader: &mut impl BufRead) -> Result<(ObjectType, usize), ObjectError> {
        let mut type_bytes = Vec::new();
        reader
            .read_until(b' ', &mut type_bytes)
            .map_err(|e| ObjectError::CorruptObject(format!("unreadable object header: {e}")))?;
        if type_bytes.pop() != Some(b' ') {
            return Err(ObjectError::CorruptObject(
                "missing space after object type".to_string(),
            ));
        }

        let object_type = std::str::from_utf8(&type_bytes)
            .map_err(|_| ObjectError::CorruptObject("non-utf8 object type".to_string()))?;
        let object_type = ObjectType::try_from(object_type)?;

        let mut size_bytes = Vec::new();
        reader
            .read_until(b'\0', &mut size_bytes)
            .map_err(|e| ObjectError::CorruptObject(format!("unreadable object header: {e}")))?;
        if size_bytes.pop() != Some(b'\0') {
            return Err(ObjectError::CorruptObject(
                "missing NUL after object size".to_string(),
            ));
        }

        let size = std::str::from_utf8(&size_bytes)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| {
                ObjectError::CorruptObject(format!(
                    "invalid object size {:?}",
                    String::from_utf8_lossy(&size_bytes)
                ))
            })?;

        Ok((object_type, size))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = ObjectError;

    fn try_from(value: &str) -> Result<Self, ObjectError> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(ObjectError::CorruptObject(format!(
                "invalid object type {value:?}"
            ))),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
