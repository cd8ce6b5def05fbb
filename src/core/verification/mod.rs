//! Content verification for incremental exports
//!
//! This module compares a freshly rendered file against the one already on
//! disk so unchanged exports can be left alone.

pub mod checksum;

pub use checksum::{files_match, fingerprint_file, Fingerprint};
