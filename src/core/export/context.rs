//! Run context
//!
//! Everything a run learns about the groups it visits is collected here and
//! handed to the report writer at the end. One context per run; nothing is
//! kept between runs except the report file itself.

use crate::core::export::policy::ExportPolicy;
use crate::core::report::locale::ReportLocale;
use crate::core::report::system::SystemInfo;
use crate::domain::layer::ColorTag;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Why a group was or was not written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportReason {
    /// No file existed at the target path
    NewFile,
    /// The rendered content differs from the file on disk
    ContentModified,
    /// The rendered content matches the file on disk
    NoChanges,
    /// A file exists and the policy does not look inside it
    AlreadyExists,
    /// The policy exports unconditionally
    Forced,
    /// The comparison could not be made, so the group was exported anyway
    ComparisonFailed,
}

impl ExportReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportReason::NewFile => "New file",
            ExportReason::ContentModified => "Content modified",
            ExportReason::NoChanges => "No changes",
            ExportReason::AlreadyExists => "Already exists",
            ExportReason::Forced => "Exported",
            ExportReason::ComparisonFailed => "Comparison failed",
        }
    }
}

impl fmt::Display for ExportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOutcome {
    /// A PNG was written (or would have been, in a dry run)
    Exported(ExportReason),
    /// The existing PNG was left alone
    Unchanged(ExportReason),
    /// Nothing visible once isolated
    Blank,
    /// Tagged not-ready and without visible content
    Skipped,
}

impl GroupOutcome {
    pub fn reason(&self) -> Option<ExportReason> {
        match self {
            GroupOutcome::Exported(reason) | GroupOutcome::Unchanged(reason) => Some(*reason),
            GroupOutcome::Blank | GroupOutcome::Skipped => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupOutcome::Exported(_) => "exported",
            GroupOutcome::Unchanged(_) => "unchanged",
            GroupOutcome::Blank => "blank",
            GroupOutcome::Skipped => "skipped",
        }
    }
}

impl fmt::Display for GroupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{} ({})", self.label(), reason),
            None => f.write_str(self.label()),
        }
    }
}

/// One visited group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRecord {
    pub artboard: String,
    pub group: String,
    pub color_tag: Option<ColorTag>,
    pub outcome: GroupOutcome,

    /// Target file, for groups that reached the policy decision
    pub file: Option<PathBuf>,
}

impl GroupRecord {
    pub fn new(
        artboard: impl Into<String>,
        group: impl Into<String>,
        color_tag: Option<ColorTag>,
        outcome: GroupOutcome,
    ) -> Self {
        Self {
            artboard: artboard.into(),
            group: group.into(),
            color_tag,
            outcome,
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// How the run ended
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    InProgress,
    Completed,
    Failed(String),
}

impl RunStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, RunStatus::Failed(_))
    }
}

/// Counts per outcome category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub modified: usize,
    pub unchanged: usize,
    pub blank: usize,
    pub skipped: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.modified + self.unchanged + self.blank + self.skipped
    }
}

/// State accumulated over one export run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub system: SystemInfo,
    pub policy: ExportPolicy,
    pub locale: ReportLocale,

    /// Tag that earns the "(Ready)" annotation
    pub ready_tag: ColorTag,
    pub dry_run: bool,
    pub status: RunStatus,
    records: Vec<GroupRecord>,
}

impl RunContext {
    pub fn new(system: SystemInfo, policy: ExportPolicy, locale: ReportLocale) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            system,
            policy,
            locale,
            ready_tag: ColorTag::Green,
            dry_run: false,
            status: RunStatus::InProgress,
            records: Vec::new(),
        }
    }

    pub fn with_ready_tag(mut self, tag: ColorTag) -> Self {
        self.ready_tag = tag;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Add a group outcome, in visiting order
    pub fn record(&mut self, record: GroupRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[GroupRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<GroupRecord> {
        self.records
    }

    /// Groups that were written
    pub fn modified(&self) -> impl Iterator<Item = &GroupRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, GroupOutcome::Exported(_)))
    }

    pub fn unchanged(&self) -> impl Iterator<Item = &GroupRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, GroupOutcome::Unchanged(_)))
    }

    pub fn blank(&self) -> impl Iterator<Item = &GroupRecord> {
        self.records
            .iter()
            .filter(|r| r.outcome == GroupOutcome::Blank)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &GroupRecord> {
        self.records
            .iter()
            .filter(|r| r.outcome == GroupOutcome::Skipped)
    }

    pub fn counts(&self) -> OutcomeCounts {
        self.records
            .iter()
            .fold(OutcomeCounts::default(), |mut counts, record| {
                match record.outcome {
                    GroupOutcome::Exported(_) => counts.modified += 1,
                    GroupOutcome::Unchanged(_) => counts.unchanged += 1,
                    GroupOutcome::Blank => counts.blank += 1,
                    GroupOutcome::Skipped => counts.skipped += 1,
                }
                counts
            })
    }

    /// Whether the group carries the ready tag
    pub fn is_ready(&self, record: &GroupRecord) -> bool {
        record.color_tag == Some(self.ready_tag)
    }

    pub fn finish(&mut self, status: RunStatus) {
        self.status = status;
    }
}
