//! Integration tests for the cumulative report file

use artex::adapters::scene::SceneHost;
use artex::core::export::{ExportEngine, ExportSettings};
use artex::core::report::{MemoryNotifier, DIVIDER};
use artex::domain::{Bounds, Document, GroupLayer, LeafLayer};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn document(folder: &Path) -> Document {
    let logo = LeafLayer::new("logo", Some(Bounds::new(0.0, 0.0, 12.0, 12.0)));
    let home = GroupLayer::new("Home", vec![GroupLayer::new("Header", vec![logo.into()]).into()]);
    Document::new("site", Bounds::new(0.0, 0.0, 24.0, 24.0), vec![home.into()]).with_folder(folder)
}

#[test]
fn test_newest_run_is_prepended() {
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("Exported_Groups/export_report.txt");
    let mut host = SceneHost::new(document(dir.path()));
    let engine = ExportEngine::default();

    engine.run(&mut host, &mut MemoryNotifier::new()).unwrap();
    let first = fs::read_to_string(&report_path).unwrap();
    assert!(!first.contains(DIVIDER));

    engine.run(&mut host, &mut MemoryNotifier::new()).unwrap();
    let second = fs::read_to_string(&report_path).unwrap();

    let (newest, history) = second.split_once(DIVIDER).unwrap();
    assert_eq!(history, first);
    assert!(newest.contains("Unchanged Groups (1):\n- Home > Header\n"));
    assert!(first.contains("Modified Groups (1):\n- Home > Header - New file\n"));
}

#[test]
fn test_history_survives_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("Exported_Groups/export_report.txt");
    fs::create_dir_all(report_path.parent().unwrap()).unwrap();
    fs::write(&report_path, b"old run \xff\xfe\n").unwrap();

    let mut host = SceneHost::new(document(dir.path()));
    ExportEngine::default()
        .run(&mut host, &mut MemoryNotifier::new())
        .unwrap();

    let text = fs::read_to_string(&report_path).unwrap();
    assert!(text.starts_with("Export Report\n"));
    assert!(text.ends_with(&format!("{DIVIDER}old run \u{fffd}\u{fffd}\n")));
}

#[test]
fn test_custom_report_file_name() {
    let dir = TempDir::new().unwrap();
    let mut settings = ExportSettings::default();
    settings.report_file = "history.log".to_string();
    let mut host = SceneHost::new(document(dir.path()));

    let summary = ExportEngine::new(settings)
        .run(&mut host, &mut MemoryNotifier::new())
        .unwrap();

    let expected = dir.path().join("Exported_Groups/history.log");
    assert_eq!(summary.report_path.as_deref(), Some(expected.as_path()));
    assert!(expected.exists());
    assert!(summary.format_notification().ends_with("See history.log for details"));
}
