//! Porcelain commands (user-facing Git operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository

pub mod init;
