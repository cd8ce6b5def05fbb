//! Export summary and reporting
//!
//! This module defines the result of one run as seen by callers: the counts,
//! the per-group records and the short text shown to the user.

use crate::core::export::context::{GroupRecord, OutcomeCounts, RunContext, RunStatus};
use crate::core::export::policy::ExportPolicy;
use crate::core::report::locale::ReportLocale;
use crate::core::state::RestoreReport;
use std::fmt::Write;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub document: String,
    pub policy: ExportPolicy,
    pub locale: ReportLocale,
    pub dry_run: bool,
    pub counts: OutcomeCounts,

    /// Group outcomes in visiting order
    pub records: Vec<GroupRecord>,
    pub duration: Duration,

    /// Report file name as shown to the user
    pub report_file: String,

    /// Where the report was written, `None` when it was not
    pub report_path: Option<PathBuf>,
    pub status: RunStatus,
    pub restore: RestoreReport,
}

impl RunSummary {
    /// Build the summary from a finished context
    pub fn from_context(
        document: impl Into<String>,
        context: RunContext,
        duration: Duration,
        report_file: impl Into<String>,
    ) -> Self {
        let counts = context.counts();
        Self {
            run_id: context.run_id,
            document: document.into(),
            policy: context.policy,
            locale: context.locale,
            dry_run: context.dry_run,
            counts,
            status: context.status.clone(),
            records: context.into_records(),
            duration,
            report_file: report_file.into(),
            report_path: None,
            restore: RestoreReport::default(),
        }
    }

    pub fn with_report_path(mut self, path: Option<PathBuf>) -> Self {
        self.report_path = path;
        self
    }

    pub fn with_restore(mut self, restore: RestoreReport) -> Self {
        self.restore = restore;
        self
    }

    /// Whether the run finished without error
    pub fn is_successful(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Find the record of one group
    pub fn record(&self, artboard: &str, group: &str) -> Option<&GroupRecord> {
        self.records
            .iter()
            .find(|r| r.artboard == artboard && r.group == group)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            document = %self.document,
            policy = %self.policy,
            dry_run = self.dry_run,
            modified = self.counts.modified,
            unchanged = self.counts.unchanged,
            blank = self.counts.blank,
            skipped = self.counts.skipped,
            duration_ms = self.duration.as_millis() as u64,
            "Export run finished"
        );

        if let RunStatus::Failed(message) = &self.status {
            tracing::warn!(error = %message, "Export run failed");
        }
        if !self.restore.is_clean() {
            tracing::warn!(
                failures = self.restore.failures,
                drifted = self.restore.drifted,
                "Document state was only partially restored"
            );
        }
    }

    /// Short text for the notifier
    pub fn format_notification(&self) -> String {
        let labels = self.locale.labels();
        let mut out = String::new();

        match &self.status {
            RunStatus::Failed(message) => {
                let _ = write!(out, "{}\n\n{}\n\n", labels.summary_failed, message);
            }
            _ => {
                let _ = write!(out, "{}\n\n", labels.summary_completed);
            }
        }

        let lines = [
            (labels.modified, self.counts.modified),
            (labels.unchanged, self.counts.unchanged),
            (labels.blank, self.counts.blank),
            (labels.skipped, self.counts.skipped),
        ];
        for (label, count) in lines {
            let _ = writeln!(out, "{}: {} {}", label, count, labels.groups);
        }
        out.push('\n');

        if self.dry_run {
            out.push_str(labels.dry_run);
        } else {
            out.push_str(&labels.see_report.replace("{file}", &self.report_file));
        }
        out
    }
}
