//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ArtexConfig;
use crate::domain::errors::ArtexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ArtexConfig
/// 4. Applies environment variable overrides (ARTEX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use artex::config::loader::load_config;
///
/// let config = load_config("artex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ArtexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ArtexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ArtexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Like [`load_config`], but a missing file yields the defaults
///
/// Environment overrides and validation still apply.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ArtexConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    finish(ArtexConfig::default())
}

/// Parse configuration text, then apply overrides and validate
pub fn parse_config(contents: &str) -> Result<ArtexConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: ArtexConfig = toml::from_str(&contents)
        .map_err(|e| ArtexError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(config)
}

fn finish(mut config: ArtexConfig) -> Result<ArtexConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ArtexError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ArtexError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ArtexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using ARTEX_* prefix
///
/// Environment variables follow the pattern: ARTEX_<SECTION>_<KEY>
/// For example: ARTEX_EXPORT_POLICY, ARTEX_REPORT_LOCALE
fn apply_env_overrides(config: &mut ArtexConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("ARTEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("ARTEX_EXPORT_POLICY") {
        config.export.policy = val.parse().map_err(|e: String| {
            ArtexError::Configuration(format!("ARTEX_EXPORT_POLICY: {e}"))
        })?;
    }
    if let Ok(val) = std::env::var("ARTEX_EXPORT_DRY_RUN") {
        config.export.dry_run = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ARTEX_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }

    // Report overrides
    if let Ok(val) = std::env::var("ARTEX_REPORT_LOCALE") {
        config.report.locale = val.parse().map_err(|e: String| {
            ArtexError::Configuration(format!("ARTEX_REPORT_LOCALE: {e}"))
        })?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ARTEX_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ARTEX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
