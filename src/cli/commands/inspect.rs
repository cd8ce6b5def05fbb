//! Inspect command implementation
//!
//! Prints the artboards and groups of a scene file together with the
//! classification an export would give them. The scene is never modified and
//! nothing is written to disk.

use super::{EXIT_DOCUMENT, EXIT_OK, EXIT_RUN_FAILED};
use crate::adapters::host::DocumentHost;
use crate::adapters::scene::SceneHost;
use crate::config::ArtexConfig;
use crate::core::export::{
    ExportEngine, ExportPolicy, ExportSettings, GroupOutcome, RunSummary,
};
use crate::core::report::MemoryNotifier;
use crate::domain::document::Document;
use crate::domain::layer::Layer;
use clap::Args;
use std::fmt::Write;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Scene file to inspect
    pub scene: PathBuf,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self, config: &ArtexConfig) -> anyhow::Result<i32> {
        tracing::info!(scene = %self.scene.display(), "Inspecting scene");

        let host = match SceneHost::open(&self.scene) {
            Ok(host) => host,
            Err(e) => {
                eprintln!("❌ Failed to open scene: {e}");
                return Ok(EXIT_DOCUMENT);
            }
        };
        let Some(document) = host.active_document().cloned() else {
            eprintln!("❌ Scene has no document");
            return Ok(EXIT_DOCUMENT);
        };

        // IfMissing never renders, so a dry run of it only classifies.
        let settings = ExportSettings::from_config(config)
            .with_policy(ExportPolicy::IfMissing)
            .with_dry_run(true);
        let mut scratch = host;
        let summary = match ExportEngine::new(settings).run(&mut scratch, &mut MemoryNotifier::new()) {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("❌ Classification failed: {e}");
                return Ok(if e.is_precondition() {
                    EXIT_DOCUMENT
                } else {
                    EXIT_RUN_FAILED
                });
            }
        };

        print!("{}", render_tree(&document, &summary));
        Ok(EXIT_OK)
    }
}

fn prediction(outcome: GroupOutcome) -> &'static str {
    match outcome {
        GroupOutcome::Exported(_) => "eligible (new file)",
        GroupOutcome::Unchanged(_) => "eligible (file exists)",
        GroupOutcome::Blank => "blank",
        GroupOutcome::Skipped => "skipped",
    }
}

fn visibility(visible: bool) -> &'static str {
    if visible {
        "visible"
    } else {
        "hidden"
    }
}

/// Artboard and group listing with predicted outcomes
pub fn render_tree(document: &Document, summary: &RunSummary) -> String {
    let mut out = String::new();
    let artboards = document.layers.iter().filter(|l| l.is_group()).count();
    let _ = writeln!(
        out,
        "📂 Document: {} ({} artboards, ruler units: {})",
        document.name, artboards, document.ruler_units
    );

    for layer in &document.layers {
        let Layer::Group(artboard) = layer else {
            continue;
        };
        let bounds = layer
            .bounds()
            .map(|b| b.to_string())
            .unwrap_or_else(|| "no bounds".to_string());
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} [{}] {}",
            artboard.name,
            visibility(artboard.visible),
            bounds
        );

        for child in &artboard.layers {
            let Layer::Group(group) = child else {
                continue;
            };
            let tag = group
                .color_tag
                .map(|t| t.to_string())
                .unwrap_or_else(|| "none".to_string());
            let predicted = summary
                .record(&artboard.name, &group.name)
                .map(|record| prediction(record.outcome))
                .unwrap_or("unknown");
            let _ = writeln!(
                out,
                "  - {} [tag: {}, {}] -> {}",
                group.name,
                tag,
                visibility(group.visible),
                predicted
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layer::{Bounds, ColorTag, GroupLayer, LeafLayer};
    use tempfile::TempDir;

    fn document(dir: &std::path::Path) -> Document {
        let header = GroupLayer::new(
            "Header",
            vec![LeafLayer::new("logo", Some(Bounds::new(0.0, 0.0, 8.0, 8.0))).into()],
        );
        let footer = GroupLayer::new("Footer", vec![]).with_color_tag(ColorTag::Red);
        let home = GroupLayer::new("Home", vec![header.into(), footer.into()]);
        Document::new("site", Bounds::new(0.0, 0.0, 16.0, 16.0), vec![home.into()])
            .with_folder(dir)
    }

    #[test]
    fn test_render_tree_lists_predictions() {
        let dir = TempDir::new().unwrap();
        let document = document(dir.path());
        let mut host = SceneHost::new(document.clone());
        let settings = ExportSettings::default()
            .with_policy(ExportPolicy::IfMissing)
            .with_dry_run(true);
        let summary = ExportEngine::new(settings)
            .run(&mut host, &mut MemoryNotifier::new())
            .unwrap();

        let text = render_tree(&document, &summary);
        assert!(text.contains("Home [visible]"));
        assert!(text.contains("  - Header [tag: none, visible] -> eligible (new file)\n"));
        assert!(text.contains("  - Footer [tag: red, visible] -> skipped\n"));
        assert!(!dir.path().join("Exported_Groups").exists());
    }

    #[test]
    fn test_inspect_leaves_scene_untouched() {
        let dir = TempDir::new().unwrap();
        let scene = dir.path().join("site.json");
        SceneHost::new(document(dir.path())).save_as(&scene).unwrap();
        let before = std::fs::read(&scene).unwrap();

        let code = InspectArgs {
            scene: scene.clone(),
        }
        .execute(&ArtexConfig::default())
        .unwrap();

        assert_eq!(code, EXIT_OK);
        assert_eq!(std::fs::read(&scene).unwrap(), before);
        assert!(!dir.path().join("Exported_Groups").exists());
    }
}
