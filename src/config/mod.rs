//! Configuration management for Artex.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Artex uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `ARTEX_*` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use artex::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("artex.toml")?;
//!
//! println!("Export policy: {}", config.export.policy);
//! println!("Report locale: {}", config.report.locale);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ExportConfig`] - Policy, output layout, tags, blank threshold, dry run
//! - [`ReportConfig`] - Report language
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! policy = "if-changed"
//! output_dir = "Exported_Groups"
//! crop_mask_name = "Crop Mask"
//! not_ready_tag = "red"
//! ready_tag = "green"
//!
//! [report]
//! locale = "en"
//!
//! [logging]
//! local_enabled = true
//! local_path = "${HOME}/.artex/logs"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{ApplicationConfig, ArtexConfig, ExportConfig, LoggingConfig, ReportConfig};
