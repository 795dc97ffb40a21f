//! Glyph string rasterization.
//!
//! Sticker glyphs are laid out left to right on a single baseline and
//! rasterized into a coverage buffer in unrotated glyph space; the
//! pixmap then blits that buffer with an inverse-mapped rotation about
//! the anchor, so the transform never leaks into other draws.

use ab_glyph::{point, Font, FontArc, ScaleFont};

/// Coverage raster of a laid-out glyph string.
///
/// Coordinates are relative to the anchor: the string's baseline-left
/// corner sits at (0, 0), and `origin_*` give the raster's top-left
/// offset from it (typically negative in y, above the baseline).
pub(crate) struct GlyphRaster {
    coverage: Vec<f32>,
    width: usize,
    height: usize,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl GlyphRaster {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Nearest-neighbor coverage sample at glyph-space offsets from the
    /// raster origin. Out-of-bounds samples are transparent.
    pub fn sample(&self, u: f64, v: f64) -> f32 {
        if u < 0.0 || v < 0.0 {
            return 0.0;
        }
        let (x, y) = (u as usize, v as usize);
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage[y * self.width + x]
    }
}

/// Lay out and rasterize `text` at `size` pixels.
///
/// Each character is resolved against the font stack in order, the way
/// a text engine falls back for missing glyphs (emoji usually live in a
/// later font than letters). Returns None when no character has an
/// outline in any font (the whole stamp would be invisible).
pub(crate) fn raster_string(fonts: &[FontArc], text: &str, size: f32) -> Option<GlyphRaster> {
    let mut caret = 0.0f32;
    let mut outlines = Vec::new();
    for ch in text.chars() {
        let font = fonts
            .iter()
            .find(|font| font.glyph_id(ch).0 != 0)
            .or_else(|| fonts.first())?;
        let scaled = font.as_scaled(size);
        let mut glyph = scaled.scaled_glyph(ch);
        glyph.position = point(caret, 0.0);
        caret += scaled.h_advance(glyph.id);
        if let Some(outlined) = scaled.outline_glyph(glyph) {
            outlines.push(outlined);
        }
    }
    if outlines.is_empty() {
        return None;
    }

    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for outlined in &outlines {
        let bounds = outlined.px_bounds();
        min_x = min_x.min(bounds.min.x);
        min_y = min_y.min(bounds.min.y);
        max_x = max_x.max(bounds.max.x);
        max_y = max_y.max(bounds.max.y);
    }
    let min_x = min_x.floor();
    let min_y = min_y.floor();
    let width = (max_x - min_x).ceil() as usize + 1;
    let height = (max_y - min_y).ceil() as usize + 1;

    let mut coverage = vec![0.0f32; width * height];
    for outlined in &outlines {
        let bounds = outlined.px_bounds();
        let offset_x = (bounds.min.x - min_x) as usize;
        let offset_y = (bounds.min.y - min_y) as usize;
        outlined.draw(|x, y, c| {
            let px = x as usize + offset_x;
            let py = y as usize + offset_y;
            if px < width && py < height {
                let cell = &mut coverage[py * width + px];
                *cell = cell.max(c);
            }
        });
    }

    Some(GlyphRaster {
        coverage,
        width,
        height,
        origin_x: min_x as f64,
        origin_y: min_y as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_transparent_out_of_bounds() {
        let raster = GlyphRaster {
            coverage: vec![1.0; 4],
            width: 2,
            height: 2,
            origin_x: 0.0,
            origin_y: 0.0,
        };
        assert_eq!(raster.sample(-0.5, 0.5), 0.0);
        assert_eq!(raster.sample(0.5, 2.5), 0.0);
        assert_eq!(raster.sample(1.5, 1.5), 1.0);
    }
}
