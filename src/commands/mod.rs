//! Git command implementations
//!
//! This module contains all command implementations, organized into two
//! categories following Git's architecture:
//!
//! - `plumbing`: Low-level commands for direct object manipulation
//!   (cat-file, hash-object, ls-tree, write-tree, commit-tree)
//! - `porcelain`: User-facing commands (init)
//!
//! Plumbing commands provide building blocks, while porcelain commands
//! compose them into higher-level operations.

pub mod plumbing;
pub mod porcelain;
