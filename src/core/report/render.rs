//! Plain-text rendering of a run

use crate::core::export::context::{GroupRecord, RunContext, RunStatus};
use crate::core::report::locale::ReportLabels;
use std::fmt::{self, Write};

/// Text report for one run, newest section of the report file
pub struct ExportReport<'a> {
    context: &'a RunContext,
}

impl<'a> ExportReport<'a> {
    pub fn new(context: &'a RunContext) -> Self {
        Self { context }
    }

    /// Render with the labels of the context's locale
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_header(&self, f: &mut impl Write, labels: &ReportLabels) -> fmt::Result {
        let ctx = self.context;
        let system = &ctx.system;

        writeln!(f, "{}", labels.title)?;
        writeln!(f, "{}", "-".repeat(labels.title.chars().count()))?;
        writeln!(f)?;
        writeln!(f, "{}:", labels.system_information)?;
        writeln!(f, "{}: {}", labels.date, system.date)?;
        writeln!(f, "{}: {}", labels.user, system.user)?;
        writeln!(f, "{}: {}", labels.host_version, system.host_version)?;
        writeln!(f, "{}: {}", labels.operating_system, system.os)?;
        writeln!(f, "{}: {}", labels.os_version, system.os_version)?;
        writeln!(f, "{}: {}", labels.export_policy, ctx.policy)?;
        match &ctx.status {
            RunStatus::InProgress => writeln!(f, "{}: {}", labels.status, labels.status_in_progress)?,
            RunStatus::Completed => writeln!(f, "{}: {}", labels.status, labels.status_completed)?,
            RunStatus::Failed(message) => {
                writeln!(f, "{}: {} ({})", labels.status, labels.status_failed, message)?
            }
        }
        writeln!(f)
    }

    fn write_section<'r>(
        f: &mut impl Write,
        heading: &str,
        records: impl Iterator<Item = &'r GroupRecord>,
        mut line: impl FnMut(&mut String, &GroupRecord),
    ) -> fmt::Result {
        let records: Vec<&GroupRecord> = records.collect();
        writeln!(f, "{} ({}):", heading, records.len())?;
        for record in records {
            let mut text = format!("- {} > {}", record.artboard, record.group);
            line(&mut text, record);
            writeln!(f, "{text}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ExportReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.context;
        let labels = ctx.locale.labels();

        self.write_header(f, labels)?;

        Self::write_section(f, labels.modified_groups, ctx.modified(), |text, record| {
            if ctx.is_ready(record) {
                let _ = write!(text, " ({})", labels.ready);
            }
            if let Some(reason) = record.outcome.reason() {
                let _ = write!(text, " - {}", labels.reason(reason));
            }
        })?;

        writeln!(f)?;
        Self::write_section(f, labels.unchanged_groups, ctx.unchanged(), |_, _| {})?;

        writeln!(f)?;
        Self::write_section(f, labels.blank_groups, ctx.blank(), |_, _| {})?;

        writeln!(f)?;
        Self::write_section(f, labels.skipped_groups, ctx.skipped(), |text, _| {
            let _ = write!(text, " ({})", labels.not_ready);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::context::{ExportReason, GroupOutcome};
    use crate::core::export::policy::ExportPolicy;
    use crate::core::report::locale::ReportLocale;
    use crate::core::report::system::SystemInfo;
    use crate::domain::layer::ColorTag;

    fn system() -> SystemInfo {
        SystemInfo {
            date: "2024-05-01 10:00:00".to_string(),
            user: "dana".to_string(),
            host_version: "artex-scene 0.3.0".to_string(),
            os: "Linux".to_string(),
            os_version: "linux/x86_64".to_string(),
        }
    }

    fn context(locale: ReportLocale) -> RunContext {
        let mut ctx = RunContext::new(system(), ExportPolicy::IfChanged, locale);
        ctx.record(GroupRecord::new(
            "Home",
            "Header",
            Some(ColorTag::Green),
            GroupOutcome::Exported(ExportReason::NewFile),
        ));
        ctx.record(GroupRecord::new(
            "Home",
            "Nav",
            None,
            GroupOutcome::Unchanged(ExportReason::NoChanges),
        ));
        ctx.record(GroupRecord::new(
            "Home",
            "Footer",
            Some(ColorTag::Red),
            GroupOutcome::Skipped,
        ));
        ctx.finish(RunStatus::Completed);
        ctx
    }

    #[test]
    fn test_english_layout() {
        let text = ExportReport::new(&context(ReportLocale::English)).render();
        let expected = "\
Export Report
-------------

System Information:
Date: 2024-05-01 10:00:00
User: dana
Host Version: artex-scene 0.3.0
Operating System: Linux
OS Version: linux/x86_64
Export Policy: if-changed
Status: Completed

Modified Groups (1):
- Home > Header (Ready) - New file

Unchanged Groups (1):
- Home > Nav

Blank Groups (0):

Skipped Groups (1):
- Home > Footer (Marked as not ready)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_german_labels() {
        let text = ExportReport::new(&context(ReportLocale::German)).render();
        assert!(text.starts_with("Exportbericht\n-------------\n"));
        assert!(text.contains("Geänderte Gruppen (1):\n- Home > Header (Fertig) - Neue Datei\n"));
        assert!(text.contains("Übersprungene Gruppen (1):"));
    }

    #[test]
    fn test_failed_status_includes_message() {
        let mut ctx = context(ReportLocale::English);
        ctx.finish(RunStatus::Failed("disk full".to_string()));
        let text = ExportReport::new(&ctx).render();
        assert!(text.contains("Status: Failed (disk full)\n"));
    }
}
