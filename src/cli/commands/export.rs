//! Export command implementation
//!
//! This module implements the `export` command for exporting the groups of a
//! scene file as PNG files.

use super::{EXIT_DOCUMENT, EXIT_OK, EXIT_RUN_FAILED};
use crate::adapters::scene::SceneHost;
use crate::config::ArtexConfig;
use crate::core::export::{ExportEngine, ExportPolicy, ExportSettings};
use crate::core::report::{ConsoleNotifier, ReportLocale};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Scene file to export
    pub scene: PathBuf,

    /// Override export policy (always, if-missing, if-changed)
    #[arg(short, long)]
    pub policy: Option<ExportPolicy>,

    /// Override report language (en, de)
    #[arg(long)]
    pub locale: Option<ReportLocale>,

    /// Dry run mode - decide everything without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

impl ExportArgs {
    /// Engine settings after CLI overrides
    pub fn settings(&self, config: &ArtexConfig) -> ExportSettings {
        let mut settings = ExportSettings::from_config(config);

        if let Some(policy) = self.policy {
            tracing::info!(policy = %policy, "Overriding export policy from CLI");
            settings = settings.with_policy(policy);
        }
        if let Some(locale) = self.locale {
            settings = settings.with_locale(locale);
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            settings = settings.with_dry_run(true);
        }
        settings
    }

    /// Execute the export command
    pub fn execute(&self, config: &ArtexConfig) -> anyhow::Result<i32> {
        tracing::info!(scene = %self.scene.display(), "Starting export command");

        let settings = self.settings(config);

        if settings.dry_run {
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let mut host = match SceneHost::open(&self.scene) {
            Ok(host) => host,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open scene");
                eprintln!("❌ Failed to open scene: {e}");
                return Ok(EXIT_DOCUMENT);
            }
        };

        println!(
            "🚀 Exporting {} (policy: {})",
            self.scene.display(),
            settings.policy
        );
        println!();

        let engine = ExportEngine::new(settings);
        match engine.run(&mut host, &mut ConsoleNotifier) {
            Ok(summary) => {
                println!();
                if let Some(path) = &summary.report_path {
                    println!("📄 Report: {}", path.display());
                }
                println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
                Ok(EXIT_OK)
            }
            Err(e) if e.is_precondition() => Ok(EXIT_DOCUMENT),
            Err(_) => Ok(EXIT_RUN_FAILED),
        }
    }
}
