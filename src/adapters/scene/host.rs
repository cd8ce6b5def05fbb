//! Scene file host
//!
//! A scene file is a [`Document`] serialized as JSON. The folder holding the
//! file is the document folder, so exports land next to it.

use super::render::{render, write_png};
use crate::adapters::host::{DocumentHost, HostResult, PngExportOptions};
use crate::domain::document::{Document, RulerUnits};
use crate::domain::errors::{ArtexError, HostError};
use crate::domain::ids::LayerPath;
use crate::domain::layer::Bounds;
use crate::domain::Result;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Version string reported by the scene host
pub const SCENE_HOST_VERSION: &str = concat!("artex-scene ", env!("CARGO_PKG_VERSION"));

/// In-process host backed by a scene document
#[derive(Debug, Clone)]
pub struct SceneHost {
    document: Option<Document>,
    source: Option<PathBuf>,
}

impl SceneHost {
    /// Host with `document` open
    pub fn new(document: Document) -> Self {
        Self {
            document: Some(document),
            source: None,
        }
    }

    /// Host with nothing open
    pub fn empty() -> Self {
        Self {
            document: None,
            source: None,
        }
    }

    /// Open a scene file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scene.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ArtexError::Io(format!("Failed to read scene file {}: {}", path.display(), e))
        })?;
        let mut document: Document = serde_json::from_str(&contents).map_err(|e| {
            ArtexError::Serialization(format!(
                "Failed to parse scene file {}: {}",
                path.display(),
                e
            ))
        })?;

        let folder = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        document.folder = Some(folder);

        tracing::debug!(
            path = %path.display(),
            document = %document.name,
            top_level_layers = document.layers.len(),
            "Opened scene"
        );

        Ok(Self {
            document: Some(document),
            source: Some(path.to_path_buf()),
        })
    }

    /// Write the open document back to the file it was opened from
    pub fn save(&self) -> Result<()> {
        let source = self.source.as_ref().ok_or_else(|| {
            ArtexError::Other("Scene was not opened from a file".to_string())
        })?;
        self.save_as(source)
    }

    /// Write the open document to `path` as pretty JSON
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let document = self.document.as_ref().ok_or(ArtexError::NoActiveDocument)?;
        let json = serde_json::to_string_pretty(document)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Path of the scene file, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    fn document_or_err(&mut self) -> HostResult<&mut Document> {
        self.document.as_mut().ok_or(HostError::NoDocument)
    }
}

impl DocumentHost for SceneHost {
    fn application_version(&self) -> String {
        SCENE_HOST_VERSION.to_string()
    }

    fn active_document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    fn set_layer_visible(&mut self, path: &LayerPath, visible: bool) -> HostResult<()> {
        let document = self.document_or_err()?;
        let layer = document
            .layer_mut(path)
            .ok_or_else(|| HostError::LayerNotFound(path.to_string()))?;
        layer.set_visible(visible);
        Ok(())
    }

    fn set_ruler_units(&mut self, units: RulerUnits) -> HostResult<()> {
        self.document_or_err()?.ruler_units = units;
        Ok(())
    }

    fn set_crop_box(&mut self, crop_box: Bounds) -> HostResult<()> {
        self.document_or_err()?.crop_box = crop_box;
        Ok(())
    }

    fn export_png(&mut self, path: &Path, options: &PngExportOptions) -> HostResult<()> {
        let document = self.document_or_err()?;
        let image = render(document)?;

        let file = fs::File::create(path).map_err(|e| {
            HostError::ExportFailed(format!("cannot create {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        write_png(&mut writer, &image, options)?;
        writer.flush().map_err(|e| {
            HostError::ExportFailed(format!("cannot write {}: {}", path.display(), e))
        })?;

        tracing::trace!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Rendered PNG"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layer::{GroupLayer, LeafLayer};
    use tempfile::TempDir;

    fn scene_json() -> &'static str {
        r#"{
            "name": "landing",
            "crop_box": {"left": 0, "top": 0, "right": 64, "bottom": 32},
            "ruler_units": "inches",
            "layers": [
                {"kind": "group", "name": "Home", "layers": [
                    {"kind": "group", "name": "Header", "color_tag": "green", "layers": [
                        {"kind": "leaf", "name": "logo", "bounds": {"left": 0, "top": 0, "right": 16, "bottom": 8}, "fill": [10, 20, 30, 255]}
                    ]}
                ]}
            ]
        }"#
    }

    #[test]
    fn test_open_sets_folder_from_file_location() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("landing.json");
        fs::write(&path, scene_json()).unwrap();

        let host = SceneHost::open(&path).unwrap();
        let document = host.active_document().unwrap();
        assert_eq!(document.folder.as_deref(), Some(dir.path()));
        assert_eq!(document.ruler_units, RulerUnits::Inches);
        assert_eq!(host.source(), Some(path.as_path()));
    }

    #[test]
    fn test_open_invalid_scene() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SceneHost::open(&path),
            Err(ArtexError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_roundtrip_keeps_visibility_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("landing.json");
        fs::write(&path, scene_json()).unwrap();

        let mut host = SceneHost::open(&path).unwrap();
        let logo = LayerPath::top(0).child(0).child(0);
        host.set_layer_visible(&logo, false).unwrap();
        host.save().unwrap();

        let reopened = SceneHost::open(&path).unwrap();
        let document = reopened.active_document().unwrap();
        assert!(!document.layer(&logo).unwrap().visible());
    }

    #[test]
    fn test_set_visible_unknown_layer() {
        let document = Document::new("d", Bounds::new(0.0, 0.0, 8.0, 8.0), vec![]);
        let mut host = SceneHost::new(document);
        let result = host.set_layer_visible(&LayerPath::top(3), true);
        assert!(matches!(result, Err(HostError::LayerNotFound(_))));
    }

    #[test]
    fn test_crop_to_rejects_degenerate_region() {
        let document = Document::new("d", Bounds::new(0.0, 0.0, 8.0, 8.0), vec![]);
        let mut host = SceneHost::new(document);
        assert!(host.crop_to(Bounds::new(0.0, 0.0, 0.5, 8.0)).is_err());
        host.crop_to(Bounds::new(2.0, 2.0, 6.0, 6.0)).unwrap();
        assert_eq!(
            host.active_document().unwrap().crop_box,
            Bounds::new(2.0, 2.0, 6.0, 6.0)
        );
    }

    #[test]
    fn test_export_png_writes_file() {
        let dir = TempDir::new().unwrap();
        let leaf = LeafLayer::new("dot", Some(Bounds::new(0.0, 0.0, 4.0, 4.0)));
        let group = GroupLayer::new("g", vec![leaf.into()]);
        let document = Document::new("d", Bounds::new(0.0, 0.0, 8.0, 8.0), vec![group.into()]);
        let mut host = SceneHost::new(document);

        let out = dir.path().join("out.png");
        host.export_png(&out, &PngExportOptions::default()).unwrap();
        let bytes = fs::read(&out).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_empty_host_has_no_document() {
        let host = SceneHost::empty();
        assert!(host.active_document().is_none());
    }
}
