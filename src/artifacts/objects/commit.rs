//! Git commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (for history; none for the root commit)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! The `parent` line is omitted entirely for root commits.

use crate::artifacts::objects::error::ObjectError;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::BufRead;

/// Author or committer information
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author with the current timestamp
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    /// Create a new author with a specific timestamp
    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Format complete author info as it appears in the commit payload
    ///
    /// # Returns
    ///
    /// String in format "Name <email> epoch-seconds timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Load author information from environment variables
    ///
    /// Reads GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL, and optionally
    /// GIT_AUTHOR_DATE. If no date is provided, uses current time.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var("GIT_AUTHOR_NAME").context("GIT_AUTHOR_NAME not set")?;
        let email = std::env::var("GIT_AUTHOR_EMAIL").context("GIT_AUTHOR_EMAIL not set")?;
        let timestamp = std::env::var("GIT_AUTHOR_DATE").ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Ok(Author::new_with_timestamp(name, email, ts)),
            None => Ok(Author::new(name, email)),
        }
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

impl TryFrom<&str> for Author {
    type Error = ObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name <email> timestamp timezone"
        // Split from the right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(ObjectError::CorruptObject(format!(
                "invalid author line {value:?}"
            )));
        }

        let timezone = parse_timezone(parts[0])?;
        let timestamp = parts[1].parse::<i64>().map_err(|_| {
            ObjectError::CorruptObject(format!("invalid author timestamp {:?}", parts[1]))
        })?;
        let name_email_part = parts[2]; // "name <email>"

        // Extract email from within angle brackets
        let email_start = name_email_part.find('<').ok_or_else(|| {
            ObjectError::CorruptObject(format!("author line missing '<': {value:?}"))
        })?;
        let email_end = name_email_part.find('>').ok_or_else(|| {
            ObjectError::CorruptObject(format!("author line missing '>': {value:?}"))
        })?;

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let timestamp = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| {
                ObjectError::CorruptObject(format!("author timestamp out of range: {timestamp}"))
            })?
            .with_timezone(&timezone);

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Parse a "+hhmm"/"-hhmm" UTC offset
fn parse_timezone(tz: &str) -> Result<chrono::FixedOffset, ObjectError> {
    let corrupt = || ObjectError::CorruptObject(format!("invalid author timezone {tz:?}"));

    if tz.len() != 5 {
        return Err(corrupt());
    }
    let sign = match tz.get(..1) {
        Some("+") => 1,
        Some("-") => -1,
        _ => return Err(corrupt()),
    };
    let hours = tz
        .get(1..3)
        .and_then(|s| s.parse::<i32>().ok())
        .ok_or_else(corrupt)?;
    let minutes = tz
        .get(3..5)
        .and_then(|s| s.parse::<i32>().ok())
        .ok_or_else(corrupt)?;

    chrono::FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(corrupt)
}

/// Git commit object
///
/// Represents a snapshot of the repository with metadata: the tree holding
/// the state of files, the parent commit(s), authorship and the message.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for the root commit)
    parents: Vec<ObjectId>,
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Author who wrote the changes
    author: Author,
    /// Committer who recorded the commit
    committer: Author,
    /// Commit message
    message: String,
}

impl Commit {
    /// Create a new commit
    ///
    /// The author is also used as the committer.
    pub fn new(
        parents: Vec<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parents,
            tree_oid,
            author: author.clone(),
            committer: author,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    fn render(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid.as_ref()));
        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes, ObjectError> {
        let content = self.render();

        let header = format!("{} {}\0", self.object_type().as_str(), content.len());
        let mut commit_bytes = Vec::with_capacity(header.len() + content.len());
        commit_bytes.extend_from_slice(header.as_bytes());
        commit_bytes.extend_from_slice(content.as_bytes());

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> Result<Self, ObjectError> {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|e| ObjectError::CorruptObject(format!("unreadable commit payload: {e}")))?;

        let content = String::from_utf8(content)
            .map_err(|_| ObjectError::CorruptObject("non-utf8 commit payload".to_string()))?;
        let mut lines = content.lines();

        let corrupt = |what: &str| ObjectError::CorruptObject(format!("commit {what}"));

        let tree_line = lines.next().ok_or_else(|| corrupt("missing tree line"))?;
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .ok_or_else(|| corrupt("invalid tree line"))?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())?;

        // Parse all parent lines (there can be 0, 1, or multiple parents)
        let mut parents = Vec::new();
        let mut next_line = lines.next().ok_or_else(|| corrupt("missing author line"))?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines.next().ok_or_else(|| corrupt("missing author line"))?;
        }

        // At this point, next_line should be the author line
        let author = next_line
            .strip_prefix("author ")
            .ok_or_else(|| corrupt("invalid author line"))?;
        let author = Author::try_from(author)?;

        let committer_line = lines.next().ok_or_else(|| corrupt("missing committer line"))?;
        let committer = committer_line
            .strip_prefix("committer ")
            .ok_or_else(|| corrupt("invalid committer line"))?;
        let _committer = Author::try_from(committer)?;

        // skip the empty line
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(parents, tree_oid, author, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.render()
    }
}
