//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Artex configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config, ArtexConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading already validates; a missing file is an error here
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print!("{}", Self::summary(&config));
        println!();
        Ok(EXIT_OK)
    }

    fn summary(config: &ArtexConfig) -> String {
        let export = &config.export;
        let logging = if config.logging.local_enabled {
            format!(
                "{} ({})",
                config.logging.local_path, config.logging.local_rotation
            )
        } else {
            "console only".to_string()
        };

        format!(
            "Configuration Summary:\n\
             \x20 Log Level: {}\n\
             \x20 Export Policy: {}\n\
             \x20 Output Folder: {}\n\
             \x20 Report File: {}\n\
             \x20 Crop Mask Layer: {}\n\
             \x20 Not Ready Tag: {}\n\
             \x20 Ready Tag: {}\n\
             \x20 Empty Threshold: {}px\n\
             \x20 Dry Run: {}\n\
             \x20 Report Language: {}\n\
             \x20 Logging: {}\n",
            config.application.log_level,
            export.policy,
            export.output_dir,
            export.report_file,
            export.crop_mask_name,
            export.not_ready_tag,
            export.ready_tag,
            export.empty_threshold_px,
            export.dry_run,
            config.report.locale,
            logging,
        )
    }
}
