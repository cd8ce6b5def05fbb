// Artex - Incremental per-group PNG export for multi-artboard documents
// Copyright (c) 2025 Artex Contributors
// Licensed under the MIT License

//! # Artex - Artboard Group Exporter
//!
//! Artex exports every layer group of every artboard in a layered document as
//! its own PNG, cropped to the artboard, and keeps a cumulative text report of
//! what each run did.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Isolating** one group at a time by toggling layer visibility
//! - **Classifying** groups as skipped (tagged not ready), blank, or eligible
//! - **Deciding** per group whether the PNG is written (always, if missing, if changed)
//! - **Restoring** visibility, crop box and ruler units when the run ends, even on failure
//! - **Reporting** each run at the top of a report file that keeps all earlier runs
//!
//! ## Architecture
//!
//! Artex follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, state, report, verification)
//! - [`adapters`] - Document hosts (the [`adapters::host::DocumentHost`] trait and a JSON scene host)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use artex::adapters::scene::SceneHost;
//! use artex::config::load_config_or_default;
//! use artex::core::export::{ExportEngine, ExportSettings};
//! use artex::core::report::ConsoleNotifier;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("artex.toml")?;
//!     let mut host = SceneHost::open("designs/landing.json")?;
//!
//!     let engine = ExportEngine::new(ExportSettings::from_config(&config));
//!     let summary = engine.run(&mut host, &mut ConsoleNotifier)?;
//!
//!     println!("Modified {} groups", summary.counts.modified);
//!     Ok(())
//! }
//! ```
//!
//! ## Incremental Export
//!
//! With the default `if-changed` policy a group is rendered to a temporary
//! file first and only replaces the existing PNG when the bytes differ, so
//! re-running an export leaves untouched groups with their old timestamps.
//!
//! ## Error Handling
//!
//! Artex uses the [`domain::ArtexError`] type for all errors:
//!
//! ```rust,no_run
//! use artex::domain::ArtexError;
//!
//! fn example() -> Result<(), ArtexError> {
//!     let config = artex::config::load_config("artex.toml")?;
//!     println!("{}", config.export.policy);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Artex uses structured logging with the `tracing` crate. Every export run is
//! wrapped in an `export_run` span carrying its run id.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
