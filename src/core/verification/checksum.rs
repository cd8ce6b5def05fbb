//! File fingerprints for change detection
//!
//! A fingerprint is the file length plus its SHA-256 digest. Two files with
//! different lengths are different without hashing either of them.

use crate::domain::Result;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Length and SHA-256 digest of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// File size in bytes
    pub len: u64,

    /// Hex-encoded SHA-256 digest (64 characters)
    pub sha256: String,
}

/// Compute the fingerprint of the file at `path`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
///
/// # Examples
///
/// ```no_run
/// use artex::core::verification::checksum::fingerprint_file;
///
/// let fingerprint = fingerprint_file("Exported_Groups/Home/Header.png").unwrap();
/// assert_eq!(fingerprint.sha256.len(), 64);
/// ```
pub fn fingerprint_file(path: impl AsRef<Path>) -> Result<Fingerprint> {
    let file = File::open(path.as_ref())?;
    let len = file.metadata()?.len();

    let mut hasher = Sha256::new();
    io::copy(&mut BufReader::new(file), &mut hasher)?;
    let result = hasher.finalize();

    Ok(Fingerprint {
        len,
        sha256: format!("{result:x}"),
    })
}

/// Whether two files have identical content
///
/// Lengths are compared first; digests are only computed when they agree.
///
/// # Errors
///
/// Returns an error if either file cannot be read. Callers treat that as
/// "cannot determine".
pub fn files_match(a: impl AsRef<Path>, b: impl AsRef<Path>) -> Result<bool> {
    let (a, b) = (a.as_ref(), b.as_ref());
    if std::fs::metadata(a)?.len() != std::fs::metadata(b)?.len() {
        return Ok(false);
    }
    Ok(fingerprint_file(a)? == fingerprint_file(b)?)
}
