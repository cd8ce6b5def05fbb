//! Rasterizer for scene documents
//!
//! Leaves are solid rectangles. Layers are composited bottom to top inside the
//! document's crop box; anything hidden, directly or through an ancestor, is
//! not drawn.

use crate::adapters::host::PngExportOptions;
use crate::domain::document::Document;
use crate::domain::errors::HostError;
use crate::domain::layer::{Bounds, Layer};
use image::{Pixel, Rgba, RgbaImage};
use std::io;

/// Fill used for leaves that don't declare one
pub const DEFAULT_FILL: [u8; 4] = [128, 128, 128, 255];

/// Largest canvas the renderer allocates (one GiB of RGBA)
pub const MAX_RENDER_PIXELS: u64 = 1 << 28;

/// Render the visible layers of `document` clipped to its crop box
pub fn render(document: &Document) -> Result<RgbaImage, HostError> {
    let crop = document.crop_box;
    let width = crop.width().round();
    let height = crop.height().round();
    if !(width >= 1.0 && height >= 1.0) {
        return Err(HostError::InvalidCrop(format!(
            "crop box {crop} has no pixels"
        )));
    }
    if width * height > MAX_RENDER_PIXELS as f64 {
        return Err(HostError::InvalidCrop(format!(
            "crop box {crop} exceeds {MAX_RENDER_PIXELS} pixels"
        )));
    }

    let mut canvas = RgbaImage::new(width as u32, height as u32);
    for layer in document.layers.iter().rev() {
        draw_layer(&mut canvas, layer, &crop);
    }
    Ok(canvas)
}

fn draw_layer(canvas: &mut RgbaImage, layer: &Layer, crop: &Bounds) {
    if !layer.visible() {
        return;
    }
    match layer {
        Layer::Leaf(leaf) => {
            if let Some(bounds) = leaf.bounds {
                fill_rect(canvas, &bounds, crop, leaf.fill.unwrap_or(DEFAULT_FILL));
            }
        }
        Layer::Group(group) => {
            for child in group.layers.iter().rev() {
                draw_layer(canvas, child, crop);
            }
        }
    }
}

fn fill_rect(canvas: &mut RgbaImage, bounds: &Bounds, crop: &Bounds, fill: [u8; 4]) {
    let (width, height) = canvas.dimensions();
    let clamp = |v: f64, max: u32| -> u32 {
        if v.is_nan() {
            0
        } else {
            v.round().clamp(0.0, f64::from(max)) as u32
        }
    };

    let x0 = clamp(bounds.left - crop.left, width);
    let x1 = clamp(bounds.right - crop.left, width);
    let y0 = clamp(bounds.top - crop.top, height);
    let y1 = clamp(bounds.bottom - crop.top, height);

    let color = Rgba(fill);
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.get_pixel_mut(x, y).blend(&color);
        }
    }
}

/// Encode `image` as PNG according to `options`
///
/// Without transparency the image is flattened onto white and written as RGB.
pub fn write_png<W: io::Write>(
    w: W,
    image: &RgbaImage,
    options: &PngExportOptions,
) -> Result<(), HostError> {
    if options.png8 {
        return Err(HostError::Unsupported("PNG-8 output".to_string()));
    }
    if options.interlaced {
        return Err(HostError::Unsupported("interlaced PNG output".to_string()));
    }

    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_depth(png::BitDepth::Eight);

    let data = if options.transparency {
        encoder.set_color(png::ColorType::Rgba);
        image.as_raw().clone()
    } else {
        encoder.set_color(png::ColorType::Rgb);
        flatten_on_white(image)
    };

    let mut writer = encoder
        .write_header()
        .map_err(|e| HostError::ExportFailed(format!("PNG header: {e}")))?;
    writer
        .write_image_data(&data)
        .map_err(|e| HostError::ExportFailed(format!("PNG data: {e}")))?;
    writer
        .finish()
        .map_err(|e| HostError::ExportFailed(format!("PNG trailer: {e}")))
}

fn flatten_on_white(image: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.width() as usize * image.height() as usize * 3);
    for pixel in image.pixels() {
        let mut background = Rgba([255, 255, 255, 255]);
        background.blend(pixel);
        out.extend_from_slice(&background.0[..3]);
    }
    out
}
