//! Export engine
//!
//! Walks the artboards of the active document, isolates one group at a time,
//! classifies it and writes its PNG when the policy asks for it.
//!
//! A run is:
//!
//! 1. **Preflight**: an open, saved document is required; nothing is touched otherwise
//! 2. **Capture**: a [`StateGuard`] records visibility, crop box and ruler unit
//! 3. **Iterate**: artboards in document order, groups in artboard order
//! 4. **Restore**: the guard puts the document back, on success and on failure
//! 5. **Report**: the report is prepended to the report file and the summary surfaced

use crate::adapters::host::DocumentHost;
use crate::core::export::context::{
    ExportReason, GroupOutcome, GroupRecord, RunContext, RunStatus,
};
use crate::core::export::naming::OutputLayout;
use crate::core::export::policy::ExportPolicy;
use crate::core::export::settings::ExportSettings;
use crate::core::export::summary::RunSummary;
use crate::core::report::history::write_with_history;
use crate::core::report::notify::Notifier;
use crate::core::report::render::ExportReport;
use crate::core::report::system::SystemInfo;
use crate::core::state::{RestoreReport, StateGuard, VisibilitySnapshot};
use crate::core::verification::checksum::files_match;
use crate::domain::document::Document;
use crate::domain::errors::ArtexError;
use crate::domain::ids::LayerPath;
use crate::domain::layer::{Bounds, GroupLayer, Layer};
use crate::domain::Result;
use crate::{log_error_with_context, log_group_outcome};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Incremental per-group PNG exporter
#[derive(Debug, Clone, Default)]
pub struct ExportEngine {
    settings: ExportSettings,
}

impl ExportEngine {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Export every group of the host's active document
    ///
    /// The summary is always handed to `notifier`, also when the run fails.
    ///
    /// # Errors
    ///
    /// - [`ArtexError::NoActiveDocument`] / [`ArtexError::DocumentNotSaved`]
    ///   before anything is touched
    /// - Any host or I/O failure during iteration, after the document state
    ///   has been restored and the partial report written
    pub fn run<H: DocumentHost + ?Sized>(
        &self,
        host: &mut H,
        notifier: &mut dyn Notifier,
    ) -> Result<RunSummary> {
        let (document_name, layout) = match self.preflight(host) {
            Ok(preflight) => preflight,
            Err(e) => {
                log_error_with_context!(&e, "Export preflight failed");
                notifier.notify_error(&e.to_string());
                return Err(e);
            }
        };

        let system = SystemInfo::capture(host.application_version());
        let mut context = RunContext::new(system, self.settings.policy, self.settings.locale)
            .with_ready_tag(self.settings.ready_tag)
            .with_dry_run(self.settings.dry_run);

        let span = tracing::info_span!(
            "export_run",
            run_id = %context.run_id,
            document = %document_name,
            policy = %self.settings.policy,
            dry_run = self.settings.dry_run
        );
        let _enter = span.enter();
        tracing::info!(output = %layout.root().display(), "Starting export");

        let started = Instant::now();
        let (restore, result) = self.process_document(host, &layout, &mut context);

        let mut failure = match result {
            Ok(()) => None,
            Err(e) => {
                log_error_with_context!(&e, "Export run aborted");
                Some(e)
            }
        };
        context.finish(match &failure {
            Some(e) => RunStatus::Failed(e.to_string()),
            None => RunStatus::Completed,
        });

        let report_path = if self.settings.dry_run {
            tracing::info!("Dry run, report not written");
            None
        } else {
            let path = layout.report_path();
            let text = ExportReport::new(&context).render();
            match write_with_history(&path, &text) {
                Ok(()) => Some(path),
                Err(e) => {
                    log_error_with_context!(&e, "Failed to write export report");
                    if failure.is_none() {
                        context.finish(RunStatus::Failed(e.to_string()));
                        failure = Some(e);
                    }
                    None
                }
            }
        };

        let summary = RunSummary::from_context(
            document_name,
            context,
            started.elapsed(),
            self.settings.report_file.clone(),
        )
        .with_report_path(report_path)
        .with_restore(restore);
        summary.log_summary();

        match failure {
            Some(e) => {
                notifier.notify_error(&summary.format_notification());
                Err(e)
            }
            None => {
                notifier.notify(&summary.format_notification());
                Ok(summary)
            }
        }
    }

    fn preflight<H: DocumentHost + ?Sized>(&self, host: &H) -> Result<(String, OutputLayout)> {
        let document = host.active_document().ok_or(ArtexError::NoActiveDocument)?;
        let folder = document
            .folder
            .as_deref()
            .ok_or_else(|| ArtexError::DocumentNotSaved(document.name.clone()))?;

        let layout = OutputLayout::new(
            folder,
            &self.settings.output_dir,
            &self.settings.report_file,
        );
        Ok((document.name.clone(), layout))
    }

    /// Process every artboard under a state guard
    ///
    /// The restore report is returned on both paths so a failed run still
    /// reports what could not be put back.
    fn process_document<H: DocumentHost + ?Sized>(
        &self,
        host: &mut H,
        layout: &OutputLayout,
        context: &mut RunContext,
    ) -> (RestoreReport, Result<()>) {
        let mut guard = match StateGuard::acquire(host) {
            Ok(guard) => guard,
            Err(e) => return (RestoreReport::default(), Err(e)),
        };
        let result = self.process_artboards(&mut guard, layout, context);
        (guard.restore(), result)
    }

    fn process_artboards<H: DocumentHost + ?Sized>(
        &self,
        guard: &mut StateGuard<'_, H>,
        layout: &OutputLayout,
        context: &mut RunContext,
    ) -> Result<()> {
        let (host, snapshot) = guard.split();

        // The tree's shape never changes during a run; only flags and the crop box do.
        let plan: Document = host
            .active_document()
            .ok_or(ArtexError::NoActiveDocument)?
            .clone();

        if !self.settings.dry_run {
            create_dir(layout.root())?;
        }

        let mut targets = HashSet::new();
        for (index, layer) in plan.layers.iter().enumerate() {
            let Layer::Group(artboard) = layer else {
                tracing::debug!(layer = %layer.name(), "Skipping top-level layer that is not an artboard");
                continue;
            };
            self.process_artboard(
                host,
                snapshot,
                &plan,
                index,
                artboard,
                layer.bounds(),
                layout,
                context,
                &mut targets,
            )?;
        }

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn process_artboard<H: DocumentHost + ?Sized>(
        &self,
        host: &mut H,
        snapshot: &VisibilitySnapshot,
        plan: &Document,
        index: usize,
        artboard: &GroupLayer,
        bounds: Option<Bounds>,
        layout: &OutputLayout,
        context: &mut RunContext,
        targets: &mut HashSet<PathBuf>,
    ) -> Result<()> {
        let artboard_path = LayerPath::top(index);
        tracing::debug!(
            artboard = %artboard.name,
            bounds = %bounds.map(|b| b.to_string()).unwrap_or_else(|| "none".to_string()),
            "Processing artboard"
        );
        if bounds.is_none() {
            tracing::warn!(artboard = %artboard.name, "Artboard has no bounds, exporting uncropped");
        }

        if !self.settings.dry_run {
            create_dir(&layout.artboard_dir(&artboard.name))?;
        }

        for other in 0..plan.layers.len() {
            host.set_layer_visible(&LayerPath::top(other), other == index)?;
        }

        let threshold = self.settings.empty_threshold_px;
        let crop_mask = self.settings.crop_mask_name.as_str();

        for (group_index, child) in artboard.layers.iter().enumerate() {
            if child.name() == crop_mask {
                tracing::debug!(artboard = %artboard.name, "Crop mask is never exported");
                continue;
            }
            let Layer::Group(group) = child else {
                continue;
            };
            let group_path = artboard_path.child(group_index);

            if group.color_tag == Some(self.settings.not_ready_tag) {
                let captured = |path: &LayerPath, layer: &Layer| {
                    snapshot.visible(path).unwrap_or_else(|| layer.visible())
                };
                let has_content = child.has_visible_content_by(&group_path, threshold, &captured);
                if !has_content {
                    self.record(context, artboard, group, GroupOutcome::Skipped, None);
                    continue;
                }
            }

            for (sibling_index, sibling) in artboard.layers.iter().enumerate() {
                if sibling.is_group() || sibling.name() == crop_mask {
                    host.set_layer_visible(&artboard_path.child(sibling_index), false)?;
                }
            }
            host.set_layer_visible(&group_path, true)?;
            for (content_index, content) in group.layers.iter().enumerate() {
                let visible = content.name() != crop_mask;
                host.set_layer_visible(&group_path.child(content_index), visible)?;
            }

            let has_content = host
                .active_document()
                .and_then(|document| document.layer(&group_path))
                .map(|layer| layer.has_visible_content(threshold))
                .unwrap_or(false);
            if !has_content {
                self.record(context, artboard, group, GroupOutcome::Blank, None);
                continue;
            }

            let target = layout.group_file(&artboard.name, &group.name);
            if !targets.insert(target.clone()) {
                tracing::warn!(
                    artboard = %artboard.name,
                    group = %group.name,
                    path = %target.display(),
                    "Another group in this run maps to the same file; it will be overwritten"
                );
            }

            let outcome = self.decide(host, &target, bounds)?;
            self.record(context, artboard, group, outcome, Some(target));
        }

        Ok(())
    }

    fn record(
        &self,
        context: &mut RunContext,
        artboard: &GroupLayer,
        group: &GroupLayer,
        outcome: GroupOutcome,
        file: Option<PathBuf>,
    ) {
        log_group_outcome!(artboard.name, group.name, outcome);
        let mut record = GroupRecord::new(&artboard.name, &group.name, group.color_tag, outcome);
        record.file = file;
        context.record(record);
    }

    /// Apply the export policy to an isolated, non-blank group
    fn decide<H: DocumentHost + ?Sized>(
        &self,
        host: &mut H,
        target: &Path,
        crop: Option<Bounds>,
    ) -> Result<GroupOutcome> {
        let exists = match target.try_exists() {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(path = %target.display(), error = %e, "Cannot tell whether file exists");
                false
            }
        };

        match self.settings.policy {
            ExportPolicy::Always => {
                self.export_to(host, target, crop)?;
                Ok(GroupOutcome::Exported(ExportReason::Forced))
            }
            ExportPolicy::IfMissing if exists => {
                Ok(GroupOutcome::Unchanged(ExportReason::AlreadyExists))
            }
            ExportPolicy::IfChanged if exists => self.compare_and_replace(host, target, crop),
            ExportPolicy::IfMissing | ExportPolicy::IfChanged => {
                self.export_to(host, target, crop)?;
                Ok(GroupOutcome::Exported(ExportReason::NewFile))
            }
        }
    }

    fn export_to<H: DocumentHost + ?Sized>(
        &self,
        host: &mut H,
        target: &Path,
        crop: Option<Bounds>,
    ) -> Result<()> {
        if self.settings.dry_run {
            tracing::debug!(path = %target.display(), "Dry run, not writing");
            return Ok(());
        }
        self.render_to(host, target, crop)
    }

    fn compare_and_replace<H: DocumentHost + ?Sized>(
        &self,
        host: &mut H,
        target: &Path,
        crop: Option<Bounds>,
    ) -> Result<GroupOutcome> {
        let temp = TempExport::new(OutputLayout::temp_path(target));
        self.render_to(host, temp.path(), crop)?;

        let reason = match files_match(target, temp.path()) {
            Ok(true) => return Ok(GroupOutcome::Unchanged(ExportReason::NoChanges)),
            Ok(false) => ExportReason::ContentModified,
            Err(e) => {
                tracing::warn!(
                    path = %target.display(),
                    error = %e,
                    "Could not compare with existing file, exporting anyway"
                );
                ExportReason::ComparisonFailed
            }
        };

        if !self.settings.dry_run {
            temp.persist(target)?;
        }
        Ok(GroupOutcome::Exported(reason))
    }

    /// Crop to `crop`, export to `path`, put the crop box back
    fn render_to<H: DocumentHost + ?Sized>(
        &self,
        host: &mut H,
        path: &Path,
        crop: Option<Bounds>,
    ) -> Result<()> {
        let Some(region) = crop else {
            host.export_png(path, &self.settings.png_options)?;
            return Ok(());
        };

        let original = host
            .active_document()
            .map(|document| document.crop_box)
            .ok_or(ArtexError::NoActiveDocument)?;

        host.crop_to(region)?;
        let exported = host.export_png(path, &self.settings.png_options);
        let restored = host.set_crop_box(original);

        exported?;
        restored?;
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        ArtexError::Export(format!("Failed to create folder {}: {}", path.display(), e))
    })
}

/// Scratch export that is removed unless persisted
struct TempExport {
    path: PathBuf,
    persisted: bool,
}

impl TempExport {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            persisted: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Move the scratch file over `target`
    fn persist(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target).map_err(|e| {
            ArtexError::Export(format!(
                "Failed to replace {} with {}: {}",
                target.display(),
                self.path.display(),
                e
            ))
        })?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempExport {
    fn drop(&mut self) {
        if self.persisted {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove temporary export");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scene::SceneHost;
    use crate::core::report::notify::MemoryNotifier;
    use crate::domain::layer::{ColorTag, LeafLayer};
    use tempfile::TempDir;

    fn leaf(name: &str, w: f64, h: f64) -> Layer {
        LeafLayer::new(name, Some(Bounds::new(0.0, 0.0, w, h)))
            .with_fill([200, 10, 10, 255])
            .into()
    }

    fn host_in(dir: &Path, layers: Vec<Layer>) -> SceneHost {
        SceneHost::new(
            Document::new("site", Bounds::new(0.0, 0.0, 32.0, 32.0), layers).with_folder(dir),
        )
    }

    #[test]
    fn test_temp_export_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.png.temp");
        fs::write(&path, b"x").unwrap();
        drop(TempExport::new(path.clone()));
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_export_persist_replaces_target() {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().join("a.png.temp");
        let target = dir.path().join("a.png");
        fs::write(&temp, b"new").unwrap();
        fs::write(&target, b"old").unwrap();

        TempExport::new(temp.clone()).persist(&target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"new");
        assert!(!temp.exists());
    }

    #[test]
    fn test_red_group_with_content_is_exported() {
        let dir = TempDir::new().unwrap();
        let group = GroupLayer::new("Hero", vec![leaf("img", 10.0, 10.0)])
            .with_color_tag(ColorTag::Red);
        let artboard = GroupLayer::new("Home", vec![group.into()]);
        let mut host = host_in(dir.path(), vec![artboard.into()]);

        let summary = ExportEngine::default()
            .run(&mut host, &mut MemoryNotifier::new())
            .unwrap();
        assert_eq!(
            summary.record("Home", "Hero").unwrap().outcome,
            GroupOutcome::Exported(ExportReason::NewFile)
        );
    }

    #[test]
    fn test_hidden_group_is_shown_for_its_own_export() {
        let dir = TempDir::new().unwrap();
        let group = GroupLayer::new("Hidden", vec![leaf("img", 10.0, 10.0)]).hidden();
        let artboard = GroupLayer::new("Home", vec![group.into()]);
        let mut host = host_in(dir.path(), vec![artboard.into()]);

        let summary = ExportEngine::default()
            .run(&mut host, &mut MemoryNotifier::new())
            .unwrap();
        assert_eq!(summary.counts.modified, 1);

        let document = host.active_document().unwrap();
        assert!(!document.layer(&LayerPath::top(0).child(0)).unwrap().visible());
    }

    #[test]
    fn test_stray_top_level_leaf_is_ignored() {
        let dir = TempDir::new().unwrap();
        let artboard = GroupLayer::new(
            "Home",
            vec![GroupLayer::new("Header", vec![leaf("logo", 8.0, 8.0)]).into()],
        );
        let mut host = host_in(dir.path(), vec![leaf("background", 32.0, 32.0), artboard.into()]);

        let summary = ExportEngine::default()
            .run(&mut host, &mut MemoryNotifier::new())
            .unwrap();
        assert_eq!(summary.records.len(), 1);
        assert!(dir.path().join("Exported_Groups/Home/Header.png").exists());
    }

    #[test]
    fn test_crop_mask_inside_group_is_hidden() {
        let dir = TempDir::new().unwrap();
        let mask = LeafLayer::new("Crop Mask", Some(Bounds::new(0.0, 0.0, 32.0, 32.0)));
        let group = GroupLayer::new("Only Mask", vec![mask.into()]);
        let artboard = GroupLayer::new("Home", vec![group.into()])
            .with_bounds(Bounds::new(0.0, 0.0, 32.0, 32.0));
        let mut host = host_in(dir.path(), vec![artboard.into()]);

        let summary = ExportEngine::default()
            .run(&mut host, &mut MemoryNotifier::new())
            .unwrap();
        assert_eq!(
            summary.record("Home", "Only Mask").unwrap().outcome,
            GroupOutcome::Blank
        );

        let mask_path = LayerPath::top(0).child(0).child(0);
        let document = host.active_document().unwrap();
        assert!(document.layer(&mask_path).unwrap().visible());
    }

    #[test]
    fn test_crop_mask_group_is_never_exported() {
        let dir = TempDir::new().unwrap();
        let artboard = GroupLayer::new(
            "Home",
            vec![
                GroupLayer::new("Crop Mask", vec![leaf("frame", 32.0, 32.0)]).into(),
                GroupLayer::new("Header", vec![leaf("logo", 8.0, 8.0)]).into(),
            ],
        );
        let mut host = host_in(dir.path(), vec![artboard.into()]);

        let summary = ExportEngine::default()
            .run(&mut host, &mut MemoryNotifier::new())
            .unwrap();

        assert_eq!(summary.records.len(), 1);
        assert!(summary.record("Home", "Crop Mask").is_none());
        assert!(!dir.path().join("Exported_Groups/Home/Crop_Mask.png").exists());
        assert!(dir.path().join("Exported_Groups/Home/Header.png").exists());
    }

    #[test]
    fn test_comparison_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let artboard = GroupLayer::new(
            "Home",
            vec![GroupLayer::new("Header", vec![leaf("logo", 8.0, 8.0)]).into()],
        );
        let mut host = host_in(dir.path(), vec![artboard.into()]);
        let engine = ExportEngine::default();

        engine.run(&mut host, &mut MemoryNotifier::new()).unwrap();
        engine.run(&mut host, &mut MemoryNotifier::new()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path().join("Exported_Groups/Home"))
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".temp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_failed_document_pass_still_reports_restore() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Exported_Groups")).unwrap();
        fs::write(dir.path().join("Exported_Groups/Home"), b"not a folder").unwrap();
        let artboard = GroupLayer::new(
            "Home",
            vec![GroupLayer::new("Header", vec![leaf("logo", 8.0, 8.0)]).into()],
        );
        let mut host = host_in(dir.path(), vec![artboard.into()]);
        let engine = ExportEngine::default();

        let (_, layout) = engine.preflight(&host).unwrap();
        let system = SystemInfo::capture(host.application_version());
        let mut context = RunContext::new(system, ExportPolicy::IfChanged, Default::default());
        let (restore, result) = engine.process_document(&mut host, &layout, &mut context);

        assert!(matches!(result, Err(ArtexError::Export(_))));
        assert_eq!(restore.layers_restored, 3);
        assert!(restore.is_clean());
    }
}
