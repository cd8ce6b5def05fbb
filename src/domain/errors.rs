//! Domain error types
//!
//! This module defines the error hierarchy for Artex.
//! Errors raised by a document host are kept in their own enum so that the
//! engine never has to know which host produced them.

use thiserror::Error;

/// Main Artex error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ArtexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The host has no document open
    #[error("No active document. Please open a document first")]
    NoActiveDocument,

    /// The active document was never saved, so it has no folder to export into
    #[error("Document '{0}' has not been saved; it has no folder to export into")]
    DocumentNotSaved(String),

    /// Document host errors
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Report writing errors
    #[error("Report error: {0}")]
    Report(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised by a [`DocumentHost`](crate::adapters::host::DocumentHost)
///
/// These errors don't expose the host's own types (image, png, ...).
#[derive(Debug, Error)]
pub enum HostError {
    /// The host has nothing open
    #[error("No document is open")]
    NoDocument,

    /// A layer path did not resolve to a layer
    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    /// Crop region is degenerate or outside the document
    #[error("Invalid crop region: {0}")]
    InvalidCrop(String),

    /// The export primitive failed
    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// The host cannot honour the requested option
    #[error("Unsupported by host: {0}")]
    Unsupported(String),

    /// Rendering failed
    #[error("Render failed: {0}")]
    Render(String),
}

impl From<std::io::Error> for ArtexError {
    fn from(err: std::io::Error) -> Self {
        ArtexError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ArtexError {
    fn from(err: serde_json::Error) -> Self {
        ArtexError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ArtexError {
    fn from(err: toml::de::Error) -> Self {
        ArtexError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl ArtexError {
    /// Whether this error was raised before the document was touched
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ArtexError::NoActiveDocument | ArtexError::DocumentNotSaved(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artex_error_display() {
        let err = ArtexError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_host_error_conversion() {
        let host_err = HostError::ExportFailed("disk full".to_string());
        let err: ArtexError = host_err.into();
        assert!(matches!(err, ArtexError::Host(_)));
        assert_eq!(err.to_string(), "Host error: Export failed: disk full");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ArtexError = io_err.into();
        assert!(matches!(err, ArtexError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ArtexError = json_err.into();
        assert!(matches!(err, ArtexError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ArtexError = toml_err.into();
        assert!(matches!(err, ArtexError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_precondition_errors() {
        assert!(ArtexError::NoActiveDocument.is_precondition());
        assert!(ArtexError::DocumentNotSaved("Untitled".to_string()).is_precondition());
        assert!(!ArtexError::Export("boom".to_string()).is_precondition());
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = ArtexError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
        let err = HostError::Render("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
