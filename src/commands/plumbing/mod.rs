//! Plumbing commands (low-level Git operations)
//!
//! Plumbing commands provide direct access to the object database. They're
//! primarily used for scripting and as building blocks for porcelain
//! commands.
//!
//! ## Commands
//!
//! - `cat-file`: Print an object's decoded content
//! - `hash-object`: Compute object ID and optionally store in database
//! - `ls-tree`: List contents of a tree object
//! - `write-tree`: Build tree objects from the working directory
//! - `commit-tree`: Create a commit object for a tree

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
