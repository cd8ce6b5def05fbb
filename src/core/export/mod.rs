//! Export orchestration
//!
//! This module provides the core export logic for Artex, including:
//! - The export engine and its per-group decisions
//! - Export policies and settings
//! - Output naming and layout
//! - Run context and summary

pub mod context;
pub mod engine;
pub mod naming;
pub mod policy;
pub mod settings;
pub mod summary;

pub use context::{ExportReason, GroupOutcome, GroupRecord, OutcomeCounts, RunContext, RunStatus};
pub use engine::ExportEngine;
pub use naming::{group_file_name, sanitize_group_name, OutputLayout};
pub use policy::ExportPolicy;
pub use settings::ExportSettings;
pub use summary::RunSummary;
