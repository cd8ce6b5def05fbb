//! Run reports
//!
//! - [`render`] - Text rendering of a [`RunContext`](crate::core::export::RunContext)
//! - [`history`] - Prepending a new run to the existing report file
//! - [`locale`] - Report languages
//! - [`system`] - Machine and user metadata
//! - [`notify`] - Delivery of the short end-of-run summary

pub mod history;
pub mod locale;
pub mod notify;
pub mod render;
pub mod system;

pub use history::{compose_with_history, write_with_history, DIVIDER};
pub use locale::{ReportLabels, ReportLocale};
pub use notify::{ConsoleNotifier, MemoryNotifier, Notifier};
pub use render::ExportReport;
pub use system::SystemInfo;
