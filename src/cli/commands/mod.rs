//! CLI command implementations
//!
//! Every command returns its process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Run failed after partial work |
//! | 2 | Configuration error |
//! | 3 | No document, unsaved document, or unreadable scene file |
//! | 5 | Fatal error |

pub mod export;
pub mod init;
pub mod inspect;
pub mod validate;

/// Exit code for a successful command
pub const EXIT_OK: i32 = 0;

/// Exit code for a run that failed after it started touching the document
pub const EXIT_RUN_FAILED: i32 = 1;

/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for a missing, unsaved or unreadable document
pub const EXIT_DOCUMENT: i32 = 3;

/// Exit code for everything else
pub const EXIT_FATAL: i32 = 5;
