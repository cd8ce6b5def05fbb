//! Cumulative report file
//!
//! The newest run goes on top. Earlier runs follow below a divider, so the
//! file grows by one section per run.

use crate::domain::errors::ArtexError;
use crate::domain::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Separator placed between two runs
pub const DIVIDER: &str = "\n\n----------------------------------------\n\n";

/// Put `new` above `previous`, separated by [`DIVIDER`]
pub fn compose_with_history(new: &str, previous: Option<&str>) -> String {
    match previous {
        Some(previous) if !previous.is_empty() => {
            let mut out = String::with_capacity(new.len() + DIVIDER.len() + previous.len());
            out.push_str(new);
            out.push_str(DIVIDER);
            out.push_str(previous);
            out
        }
        _ => new.to_string(),
    }
}

/// Read the existing report at `path`, if there is one
///
/// Invalid UTF-8 is replaced rather than rejected so an old report never
/// blocks a new one.
pub fn read_previous(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ArtexError::Report(format!(
            "Failed to read previous report {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Write `new` to `path` with the previous contents appended beneath it
pub fn write_with_history(path: &Path, new: &str) -> Result<()> {
    let previous = read_previous(path)?;
    let contents = compose_with_history(new, previous.as_deref());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ArtexError::Report(format!(
                "Failed to create report folder {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    fs::write(path, contents).map_err(|e| {
        ArtexError::Report(format!("Failed to write report {}: {}", path.display(), e))
    })?;

    tracing::debug!(
        path = %path.display(),
        had_history = previous.is_some(),
        "Wrote report"
    );
    Ok(())
}
