//! Rasterized export of the committed log.

use ab_glyph::FontArc;
use sketchpad_core::{CommandLog, Compositor, Rgba};
use thiserror::Error;

use crate::pixmap::Pixmap;

/// Live canvas edge length in pixels (square).
pub const LIVE_CANVAS_SIZE: u32 = 256;

/// Export raster edge length in pixels (square).
pub const EXPORT_SIZE: u32 = 1024;

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export and live sizes must be non-zero")]
    EmptySurface,
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Settings for a rasterized export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub live_size: u32,
    pub export_size: u32,
    pub background: Rgba,
    /// Font stack for sticker glyphs; empty means stickers are omitted
    /// from the raster, just as they are from the live canvas.
    pub fonts: Vec<FontArc>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            live_size: LIVE_CANVAS_SIZE,
            export_size: EXPORT_SIZE,
            background: Rgba::white(),
            fonts: Vec::new(),
        }
    }
}

/// Replay the committed log onto a fresh raster at export resolution
/// and encode it as PNG.
///
/// Reads the log only: no preview, no in-progress state, and the live
/// canvas is untouched. An empty log produces a blank raster.
pub fn export_png(history: &CommandLog, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    if options.live_size == 0 || options.export_size == 0 {
        return Err(ExportError::EmptySurface);
    }
    let scale = options.export_size as f64 / options.live_size as f64;
    let mut surface = Pixmap::new(options.export_size, options.export_size)
        .with_scale(scale)
        .with_fonts(options.fonts.clone());

    Compositor::new(options.background).redraw(history, &mut surface);
    log::debug!(
        "exporting {} commands at {}x{} (scale {scale})",
        history.len(),
        options.export_size,
        options.export_size,
    );
    encode_png(surface.image())
}

/// Encode RGBA pixels as a PNG byte stream.
fn encode_png(image: &image::RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
    }
    Ok(data)
}
