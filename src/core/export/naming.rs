//! Output file layout
//!
//! ```text
//! <document folder>/
//!   Exported_Groups/
//!     export_report.txt
//!     <artboard>/
//!       <sanitized group>.png
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default folder created next to the document
pub const DEFAULT_OUTPUT_DIR: &str = "Exported_Groups";

/// Default report file name inside the output folder
pub const DEFAULT_REPORT_FILE: &str = "export_report.txt";

/// Suffix of the scratch file used for content comparison
pub const TEMP_SUFFIX: &str = ".temp";

/// Replace every character outside `[A-Za-z0-9]` with `_`
///
/// # Examples
///
/// ```
/// use artex::core::export::naming::sanitize_group_name;
///
/// assert_eq!(sanitize_group_name("Logo/Final!"), "Logo_Final_");
/// assert_eq!(sanitize_group_name("Header"), "Header");
/// ```
pub fn sanitize_group_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// PNG file name for a group
pub fn group_file_name(name: &str) -> String {
    format!("{}.png", sanitize_group_name(name))
}

/// Folder name for an artboard
///
/// Artboard names are kept as they are apart from path separators. Names
/// that would not form a folder of their own become `_`.
pub fn artboard_dir_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    match cleaned.trim() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// Resolved output paths for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    report_file: String,
}

impl OutputLayout {
    pub fn new(document_folder: &Path, output_dir: &str, report_file: &str) -> Self {
        Self {
            root: document_folder.join(output_dir),
            report_file: report_file.to_string(),
        }
    }

    /// The export folder itself
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join(&self.report_file)
    }

    pub fn artboard_dir(&self, artboard: &str) -> PathBuf {
        self.root.join(artboard_dir_name(artboard))
    }

    pub fn group_file(&self, artboard: &str, group: &str) -> PathBuf {
        self.artboard_dir(artboard).join(group_file_name(group))
    }

    /// Scratch path next to `target`
    pub fn temp_path(target: &Path) -> PathBuf {
        let mut name = target
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(TEMP_SUFFIX);
        target.with_file_name(name)
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(Path::new("."), DEFAULT_OUTPUT_DIR, DEFAULT_REPORT_FILE)
    }
}
