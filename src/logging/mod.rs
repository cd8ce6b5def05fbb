//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output on stderr
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use artex::logging::init_logging;
//! use artex::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the outcome of one group
///
/// # Example
///
/// ```no_run
/// use artex::log_group_outcome;
/// use artex::core::export::{ExportReason, GroupOutcome};
///
/// let outcome = GroupOutcome::Exported(ExportReason::NewFile);
/// log_group_outcome!("Home", "Header", outcome);
/// ```
#[macro_export]
macro_rules! log_group_outcome {
    ($artboard:expr, $group:expr, $outcome:expr) => {
        tracing::info!(
            artboard = %$artboard,
            group = %$group,
            outcome = %$outcome,
            "Group processed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use artex::log_error_with_context;
/// use artex::domain::ArtexError;
///
/// let error = ArtexError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::core::export::{ExportReason, GroupOutcome};
    use crate::domain::ArtexError;

    #[test]
    fn test_macros_expand_without_subscriber() {
        log_group_outcome!("Home", "Header", GroupOutcome::Exported(ExportReason::NewFile));
        log_error_with_context!(ArtexError::Export("boom".to_string()), "while testing");
    }
}
