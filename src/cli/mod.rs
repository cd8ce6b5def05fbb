//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Artex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Artex - Incremental per-group PNG export for multi-artboard documents
#[derive(Parser, Debug)]
#[command(name = "artex")]
#[command(version, about, long_about = None)]
#[command(author = "Artex Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "artex.toml", env = "ARTEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ARTEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every group of every artboard in a scene file
    Export(commands::export::ExportArgs),

    /// Show artboards and groups with their predicted classification
    Inspect(commands::inspect::InspectArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::ExportPolicy;
    use crate::core::report::ReportLocale;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["artex", "export", "site.json"]);
        assert_eq!(cli.config, "artex.toml");
        let Commands::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.scene.to_str(), Some("site.json"));
        assert!(args.policy.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_cli_parse_export_overrides() {
        let cli = Cli::parse_from([
            "artex",
            "export",
            "site.json",
            "--policy",
            "if-missing",
            "--locale",
            "de",
            "--dry-run",
        ]);
        let Commands::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.policy, Some(ExportPolicy::IfMissing));
        assert_eq!(args.locale, Some(ReportLocale::German));
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        let result = Cli::try_parse_from(["artex", "export", "site.json", "--policy", "never"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["artex", "--config", "custom.toml", "inspect", "site.json"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["artex", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["artex", "init", "--force"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init command");
        };
        assert!(args.force);
        assert_eq!(args.output, "artex.toml");
    }
}
