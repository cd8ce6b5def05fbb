//! Report languages
//!
//! All user-facing report and summary text comes from a [`ReportLabels`]
//! table selected by [`ReportLocale`].

use crate::core::export::context::ExportReason;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of the report and the final summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLocale {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "de")]
    German,
}

impl ReportLocale {
    pub fn labels(&self) -> &'static ReportLabels {
        match self {
            ReportLocale::English => &ENGLISH,
            ReportLocale::German => &GERMAN,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReportLocale::English => "en",
            ReportLocale::German => "de",
        }
    }
}

impl fmt::Display for ReportLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReportLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(ReportLocale::English),
            "de" | "german" | "deutsch" => Ok(ReportLocale::German),
            other => Err(format!(
                "Unknown report locale '{other}'. Must be one of: en, de"
            )),
        }
    }
}

/// Every string the report and summary print
#[derive(Debug)]
pub struct ReportLabels {
    pub title: &'static str,
    pub system_information: &'static str,
    pub date: &'static str,
    pub user: &'static str,
    pub host_version: &'static str,
    pub operating_system: &'static str,
    pub os_version: &'static str,
    pub export_policy: &'static str,
    pub status: &'static str,
    pub status_in_progress: &'static str,
    pub status_completed: &'static str,
    pub status_failed: &'static str,

    pub modified_groups: &'static str,
    pub unchanged_groups: &'static str,
    pub blank_groups: &'static str,
    pub skipped_groups: &'static str,
    pub ready: &'static str,
    pub not_ready: &'static str,

    pub summary_completed: &'static str,
    pub summary_failed: &'static str,
    pub modified: &'static str,
    pub unchanged: &'static str,
    pub blank: &'static str,
    pub skipped: &'static str,
    pub groups: &'static str,
    pub see_report: &'static str,
    pub dry_run: &'static str,

    pub reason_new_file: &'static str,
    pub reason_content_modified: &'static str,
    pub reason_no_changes: &'static str,
    pub reason_already_exists: &'static str,
    pub reason_forced: &'static str,
    pub reason_comparison_failed: &'static str,
}

impl ReportLabels {
    pub fn reason(&self, reason: ExportReason) -> &'static str {
        match reason {
            ExportReason::NewFile => self.reason_new_file,
            ExportReason::ContentModified => self.reason_content_modified,
            ExportReason::NoChanges => self.reason_no_changes,
            ExportReason::AlreadyExists => self.reason_already_exists,
            ExportReason::Forced => self.reason_forced,
            ExportReason::ComparisonFailed => self.reason_comparison_failed,
        }
    }
}

static ENGLISH: ReportLabels = ReportLabels {
    title: "Export Report",
    system_information: "System Information",
    date: "Date",
    user: "User",
    host_version: "Host Version",
    operating_system: "Operating System",
    os_version: "OS Version",
    export_policy: "Export Policy",
    status: "Status",
    status_in_progress: "In progress",
    status_completed: "Completed",
    status_failed: "Failed",

    modified_groups: "Modified Groups",
    unchanged_groups: "Unchanged Groups",
    blank_groups: "Blank Groups",
    skipped_groups: "Skipped Groups",
    ready: "Ready",
    not_ready: "Marked as not ready",

    summary_completed: "Export completed!",
    summary_failed: "Export failed!",
    modified: "Modified",
    unchanged: "Unchanged",
    blank: "Blank",
    skipped: "Skipped",
    groups: "groups",
    see_report: "See {file} for details",
    dry_run: "Dry run: no files were written",

    reason_new_file: "New file",
    reason_content_modified: "Content modified",
    reason_no_changes: "No changes",
    reason_already_exists: "Already exists",
    reason_forced: "Exported",
    reason_comparison_failed: "Comparison failed",
};

static GERMAN: ReportLabels = ReportLabels {
    title: "Exportbericht",
    system_information: "Systeminformationen",
    date: "Datum",
    user: "Benutzer",
    host_version: "Host-Version",
    operating_system: "Betriebssystem",
    os_version: "Betriebssystemversion",
    export_policy: "Exportmodus",
    status: "Status",
    status_in_progress: "Läuft",
    status_completed: "Abgeschlossen",
    status_failed: "Fehlgeschlagen",

    modified_groups: "Geänderte Gruppen",
    unchanged_groups: "Unveränderte Gruppen",
    blank_groups: "Leere Gruppen",
    skipped_groups: "Übersprungene Gruppen",
    ready: "Fertig",
    not_ready: "Als nicht fertig markiert",

    summary_completed: "Export abgeschlossen!",
    summary_failed: "Export fehlgeschlagen!",
    modified: "Geändert",
    unchanged: "Unverändert",
    blank: "Leer",
    skipped: "Übersprungen",
    groups: "Gruppen",
    see_report: "Details siehe {file}",
    dry_run: "Testlauf: es wurden keine Dateien geschrieben",

    reason_new_file: "Neue Datei",
    reason_content_modified: "Inhalt geändert",
    reason_no_changes: "Keine Änderungen",
    reason_already_exists: "Bereits vorhanden",
    reason_forced: "Exportiert",
    reason_comparison_failed: "Vergleich fehlgeschlagen",
};

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("en", ReportLocale::English ; "en code")]
    #[test_case("English", ReportLocale::English ; "english name")]
    #[test_case("DE", ReportLocale::German ; "de code")]
    #[test_case("deutsch", ReportLocale::German ; "native name")]
    fn test_parse(input: &str, expected: ReportLocale) {
        assert_eq!(input.parse::<ReportLocale>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("fr".parse::<ReportLocale>().is_err());
    }

    #[test]
    fn test_labels_differ_per_locale() {
        assert_eq!(ReportLocale::English.labels().title, "Export Report");
        assert_eq!(ReportLocale::German.labels().title, "Exportbericht");
        assert_eq!(
            ReportLocale::German.labels().reason(ExportReason::ContentModified),
            "Inhalt geändert"
        );
    }

    #[test]
    fn test_serde_accepts_codes() {
        #[derive(Deserialize)]
        struct Wrapper {
            locale: ReportLocale,
        }
        let wrapper: Wrapper = toml::from_str("locale = \"de\"").unwrap();
        assert_eq!(wrapper.locale, ReportLocale::German);
        let wrapper: Wrapper = toml::from_str("locale = \"english\"").unwrap();
        assert_eq!(wrapper.locale, ReportLocale::English);
    }
}
