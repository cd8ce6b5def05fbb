//! Engine settings

use crate::adapters::host::PngExportOptions;
use crate::config::ArtexConfig;
use crate::core::export::naming::{DEFAULT_OUTPUT_DIR, DEFAULT_REPORT_FILE};
use crate::core::export::policy::ExportPolicy;
use crate::core::report::locale::ReportLocale;
use crate::domain::layer::ColorTag;

/// Everything the engine needs to know about one run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub policy: ExportPolicy,
    pub locale: ReportLocale,
    pub output_dir: String,
    pub report_file: String,
    pub crop_mask_name: String,
    pub not_ready_tag: ColorTag,
    pub ready_tag: ColorTag,
    pub empty_threshold_px: f64,
    pub dry_run: bool,
    pub png_options: PngExportOptions,
}

impl ExportSettings {
    /// Project a loaded configuration onto engine settings
    pub fn from_config(config: &ArtexConfig) -> Self {
        let export = &config.export;
        Self {
            policy: export.policy,
            locale: config.report.locale,
            output_dir: export.output_dir.clone(),
            report_file: export.report_file.clone(),
            crop_mask_name: export.crop_mask_name.clone(),
            not_ready_tag: export.not_ready_tag,
            ready_tag: export.ready_tag,
            empty_threshold_px: export.empty_threshold_px,
            dry_run: export.dry_run,
            png_options: PngExportOptions::FULL_QUALITY,
        }
    }

    pub fn with_policy(mut self, policy: ExportPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_locale(mut self, locale: ReportLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            policy: ExportPolicy::IfChanged,
            locale: ReportLocale::English,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            report_file: DEFAULT_REPORT_FILE.to_string(),
            crop_mask_name: "Crop Mask".to_string(),
            not_ready_tag: ColorTag::Red,
            ready_tag: ColorTag::Green,
            empty_threshold_px: 1.0,
            dry_run: false,
            png_options: PngExportOptions::FULL_QUALITY,
        }
    }
}
