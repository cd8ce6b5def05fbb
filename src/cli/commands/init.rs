//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "artex.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Artex configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: artex validate-config");
                println!("  3. Preview a scene: artex inspect <scene.json>");
                println!("  4. Run export: artex export <scene.json>");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Sample configuration with every setting at its default
    pub fn sample_config() -> &'static str {
        r#"# Artex Configuration File
# Artboard group exporter
#
# Every setting below shows its default value. Values may reference
# environment variables with ${VAR_NAME}, and ARTEX_<SECTION>_<KEY>
# variables override the file (for example ARTEX_EXPORT_POLICY).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Export Settings
# ============================================================================
[export]
# When groups are written: always | if-missing | if-changed
policy = "if-changed"

# Folder created next to the document
output_dir = "Exported_Groups"

# Report file inside output_dir
report_file = "export_report.txt"

# Layer that is hidden in every export
crop_mask_name = "Crop Mask"

# Groups tagged with not_ready_tag are skipped
not_ready_tag = "red"

# Groups tagged with ready_tag are marked "(Ready)" in the report
ready_tag = "green"

# Layers this size or smaller (in pixels) count as empty
empty_threshold_px = 1.0

# Decide everything, write nothing
dry_run = false

# ============================================================================
# Report Settings
# ============================================================================
[report]
# Report language: en | de
locale = "en"

# ============================================================================
# Logging Settings
# ============================================================================
[logging]
# Also write JSON logs to local_path
local_enabled = false
local_path = "./logs"

# Rotation: daily | hourly | never
local_rotation = "daily"
"#
    }
}
