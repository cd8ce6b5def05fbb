//! Document host traits
//!
//! This module defines the interface that every document host must implement
//! to work with Artex.

use crate::domain::document::{Document, RulerUnits};
use crate::domain::errors::HostError;
use crate::domain::ids::LayerPath;
use crate::domain::layer::Bounds;
use std::path::Path;

/// Result type for host primitives
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Options passed to [`DocumentHost::export_png`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngExportOptions {
    /// Palette (8-bit) output instead of true color
    pub png8: bool,

    /// Keep the alpha channel
    pub transparency: bool,

    /// Interlaced (Adam7) output
    pub interlaced: bool,

    /// Quality hint, 0 to 100
    pub quality: u8,
}

impl PngExportOptions {
    /// True color, alpha preserved, not interlaced, full quality
    pub const FULL_QUALITY: PngExportOptions = PngExportOptions {
        png8: false,
        transparency: true,
        interlaced: false,
        quality: 100,
    };
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self::FULL_QUALITY
    }
}

/// Image-editing host driven by the export engine
///
/// Hosts are used from a single thread for the duration of one run. Every
/// primitive is blocking.
pub trait DocumentHost {
    /// Version string of the host application, recorded in the report
    fn application_version(&self) -> String;

    /// The document the run operates on, `None` when nothing is open
    fn active_document(&self) -> Option<&Document>;

    /// Change the visibility flag of a single layer
    ///
    /// # Errors
    ///
    /// Returns [`HostError::LayerNotFound`] if the path does not resolve.
    fn set_layer_visible(&mut self, path: &LayerPath, visible: bool) -> HostResult<()>;

    /// Change the measurement unit preference
    fn set_ruler_units(&mut self, units: RulerUnits) -> HostResult<()>;

    /// Replace the document's crop box
    ///
    /// Used both to crop to an artboard and to put the original box back.
    fn set_crop_box(&mut self, crop_box: Bounds) -> HostResult<()>;

    /// Render the document as it is currently shown and write it as PNG
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails, or if the host cannot
    /// honour `options`.
    fn export_png(&mut self, path: &Path, options: &PngExportOptions) -> HostResult<()>;

    /// Crop the document to `region`
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidCrop`] for regions narrower or lower than one pixel.
    fn crop_to(&mut self, region: Bounds) -> HostResult<()> {
        if !(region.width() >= 1.0 && region.height() >= 1.0) {
            return Err(HostError::InvalidCrop(format!(
                "region {region} is smaller than one pixel"
            )));
        }
        self.set_crop_box(region)
    }
}
