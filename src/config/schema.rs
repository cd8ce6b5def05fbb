//! Configuration schema types
//!
//! This module defines the configuration structure for Artex. Every field has
//! a default, so an empty file (or no file at all) is a valid configuration.

use crate::core::export::naming::{DEFAULT_OUTPUT_DIR, DEFAULT_REPORT_FILE};
use crate::core::export::ExportPolicy;
use crate::core::report::ReportLocale;
use crate::domain::layer::ColorTag;
use serde::{Deserialize, Serialize};

/// Main Artex configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArtexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// When eligible groups are (re-)exported
    #[serde(default)]
    pub policy: ExportPolicy,

    /// Folder created next to the document, relative to the document folder
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Report file name inside `output_dir`
    #[serde(default = "default_report_file")]
    pub report_file: String,

    /// Name of the sentinel layer that never appears in exports
    #[serde(default = "default_crop_mask_name")]
    pub crop_mask_name: String,

    /// Color tag marking a group as not ready
    #[serde(default = "default_not_ready_tag")]
    pub not_ready_tag: ColorTag,

    /// Color tag marking a group as ready (cosmetic)
    #[serde(default = "default_ready_tag")]
    pub ready_tag: ColorTag,

    /// Layers this size or smaller in either axis count as empty
    #[serde(default = "default_empty_threshold_px")]
    pub empty_threshold_px: f64,

    /// Decide everything, write nothing
    #[serde(default)]
    pub dry_run: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.report_file.trim().is_empty() {
            return Err("export.report_file cannot be empty".to_string());
        }
        if self.report_file.contains(['/', '\\']) {
            return Err(format!(
                "export.report_file '{}' must be a file name, not a path",
                self.report_file
            ));
        }

        if self.crop_mask_name.is_empty() {
            return Err("export.crop_mask_name cannot be empty".to_string());
        }

        if self.not_ready_tag == self.ready_tag {
            return Err(format!(
                "export.not_ready_tag and export.ready_tag must differ (both '{}')",
                self.ready_tag
            ));
        }

        if !self.empty_threshold_px.is_finite() || self.empty_threshold_px < 0.0 {
            return Err(format!(
                "export.empty_threshold_px must be a finite value >= 0, got {}",
                self.empty_threshold_px
            ));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            policy: ExportPolicy::default(),
            output_dir: default_output_dir(),
            report_file: default_report_file(),
            crop_mask_name: default_crop_mask_name(),
            not_ready_tag: default_not_ready_tag(),
            ready_tag: default_ready_tag(),
            empty_threshold_px: default_empty_threshold_px(),
            dry_run: false,
        }
    }
}

/// Report configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Language of the report and the summary
    #[serde(default)]
    pub locale: ReportLocale,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_report_file() -> String {
    DEFAULT_REPORT_FILE.to_string()
}

fn default_crop_mask_name() -> String {
    "Crop Mask".to_string()
}

fn default_not_ready_tag() -> ColorTag {
    ColorTag::Red
}

fn default_ready_tag() -> ColorTag {
    ColorTag::Green
}

fn default_empty_threshold_px() -> f64 {
    1.0
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_valid() {
        let config: ArtexConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.export.policy, ExportPolicy::IfChanged);
        assert_eq!(config.export.output_dir, "Exported_Groups");
        assert_eq!(config.export.crop_mask_name, "Crop Mask");
        assert_eq!(config.export.not_ready_tag, ColorTag::Red);
        assert_eq!(config.report.locale, ReportLocale::English);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.report_file = "sub/report.txt".to_string();
        assert!(config.validate().is_err());

        config.report_file = default_report_file();
        config.ready_tag = ColorTag::Red;
        assert!(config.validate().is_err());

        config.ready_tag = ColorTag::Green;
        config.empty_threshold_px = -1.0;
        assert!(config.validate().is_err());

        config.empty_threshold_px = f64::NAN;
        assert!(config.validate().is_err());

        config.empty_threshold_px = 0.0;
        config.output_dir = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_full_toml() {
        let toml_content = r#"
[application]
log_level = "debug"

[export]
policy = "always"
output_dir = "out"
not_ready_tag = "orange"
empty_threshold_px = 2.5
dry_run = true

[report]
locale = "de"

[logging]
local_enabled = true
local_path = "/tmp/artex-logs"
local_rotation = "never"
"#;
        let config: ArtexConfig = toml::from_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.export.policy, ExportPolicy::Always);
        assert_eq!(config.export.not_ready_tag, ColorTag::Orange);
        assert_eq!(config.export.empty_threshold_px, 2.5);
        assert!(config.export.dry_run);
        assert_eq!(config.report.locale, ReportLocale::German);
        assert_eq!(config.logging.local_rotation, "never");
    }

    #[test]
    fn test_serialized_defaults_roundtrip_through_toml() {
        let text = toml::to_string(&ArtexConfig::default()).unwrap();
        let parsed: ArtexConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.export.policy, ExportPolicy::IfChanged);
        assert_eq!(parsed.export.report_file, "export_report.txt");
    }
}
