//! A minimal git object database
//!
//! `mit` implements the object layer of git: content-addressed storage of
//! blobs (file content), trees (directory snapshots) and commits (history
//! snapshots), in git's on-disk object format.
//!
//! The crate is organized in three layers:
//!
//! - [`artifacts`]: the object types and their wire codecs
//! - [`areas`]: repository components (object database, workspace, refs)
//! - [`commands`]: command implementations composing the two layers

pub mod areas;
pub mod artifacts;
pub mod commands;
