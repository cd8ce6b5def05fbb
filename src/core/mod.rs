//! Core business logic for Artex.
//!
//! # Modules
//!
//! - [`export`] - The export engine, policies, naming and run summary
//! - [`state`] - Capture and restoration of the document state
//! - [`report`] - The cumulative text report and end-of-run notification
//! - [`verification`] - Content fingerprints for change detection
//!
//! # Export Workflow
//!
//! 1. **Preflight**: Require an open document that has been saved
//! 2. **Capture**: Snapshot layer visibility, crop box and ruler unit
//! 3. **Isolate**: Show one artboard, then one group at a time
//! 4. **Classify**: Skipped, blank, or eligible for export
//! 5. **Decide**: Let the export policy decide whether the PNG is written
//! 6. **Restore**: Put the document back the way it was
//! 7. **Report**: Prepend the run to the report file and notify the user
//!
//! # Example
//!
//! ```rust,no_run
//! use artex::adapters::scene::SceneHost;
//! use artex::core::export::{ExportEngine, ExportPolicy, ExportSettings};
//! use artex::core::report::ConsoleNotifier;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut host = SceneHost::open("designs/landing.json")?;
//! let engine = ExportEngine::new(ExportSettings::default().with_policy(ExportPolicy::IfChanged));
//!
//! let summary = engine.run(&mut host, &mut ConsoleNotifier)?;
//! println!("Modified: {}", summary.counts.modified);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod report;
pub mod state;
pub mod verification;
