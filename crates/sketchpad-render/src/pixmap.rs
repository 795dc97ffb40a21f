//! CPU pixel surface.

use ab_glyph::FontArc;
use image::{Rgba as ImageRgba, RgbaImage};
use kurbo::Point;
use sketchpad_core::{DrawSurface, Rgba};

use crate::glyph;

/// Software raster target implementing the core's drawing seam.
///
/// Incoming coordinates are in live-canvas pixels and pass through a
/// uniform scale, so the same command log replays identically onto the
/// on-screen pixmap and the higher-resolution export pixmap.
pub struct Pixmap {
    image: RgbaImage,
    scale: f64,
    fonts: Vec<FontArc>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            scale: 1.0,
            fonts: Vec::new(),
        }
    }

    /// Uniform scale applied to every coordinate and width.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Font stack used for sticker glyphs, resolved per character in
    /// order. Without any font, glyph draws are skipped rather than
    /// failing.
    pub fn with_fonts(mut self, fonts: Vec<FontArc>) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn map(&self, point: Point) -> Point {
        Point::new(point.x * self.scale, point.y * self.scale)
    }

    /// Source-over blend of one pixel. Out-of-bounds writes are dropped.
    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if color.a == 0 {
            return;
        }
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let dst = self.image.get_pixel(x, y).0;
        let src_a = color.a as f32 / 255.0;
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        let blend = |src: u8, dst: u8| {
            let src_f = src as f32 / 255.0;
            let dst_f = dst as f32 / 255.0;
            ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        self.image.put_pixel(
            x,
            y,
            ImageRgba([
                blend(color.r, dst[0]),
                blend(color.g, dst[1]),
                blend(color.b, dst[2]),
                (out_a * 255.0).round() as u8,
            ]),
        );
    }

    /// Filled disc, used to stamp thick line segments.
    fn fill_disc(&mut self, center: Point, radius: f64, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let radius_sq = radius * radius;
        let min_x = (center.x - radius).floor() as i64;
        let max_x = (center.x + radius).ceil() as i64;
        let min_y = (center.y - radius).floor() as i64;
        let max_y = (center.y + radius).ceil() as i64;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// One segment of a polyline, stamped as overlapping discs so joins
    /// and caps come out round.
    fn draw_segment(&mut self, start: Point, end: Point, width: f64, color: Rgba) {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
        let radius = (width / 2.0).max(0.5);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let at = Point::new(start.x + dx * t, start.y + dy * t);
            self.fill_disc(at, radius, color);
        }
    }
}

impl DrawSurface for Pixmap {
    fn clear(&mut self, color: Rgba) {
        let fill = ImageRgba(color.to_array());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba) {
        let width = width * self.scale;
        for pair in points.windows(2) {
            let start = self.map(pair[0]);
            let end = self.map(pair[1]);
            self.draw_segment(start, end, width, color);
        }
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba) {
        let center = self.map(center);
        let radius = radius * self.scale;
        if radius <= 0.0 {
            return;
        }
        let half = (width * self.scale / 2.0).max(0.5);
        let outer = radius + half;
        let inner = (radius - half).max(0.0);
        let (outer_sq, inner_sq) = (outer * outer, inner * inner);
        let min_x = (center.x - outer).floor() as i64;
        let max_x = (center.x + outer).ceil() as i64;
        let min_y = (center.y - outer).floor() as i64;
        let max_y = (center.y + outer).ceil() as i64;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq >= inner_sq && dist_sq <= outer_sq {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn fill_glyph(&mut self, glyph: &str, anchor: Point, size: f64, rotation: f64, color: Rgba) {
        if self.fonts.is_empty() {
            log::debug!("no fonts loaded; skipping glyph {glyph:?}");
            return;
        }
        if glyph.is_empty() {
            return;
        }
        let anchor = self.map(anchor);
        let size = (size * self.scale) as f32;
        let Some(raster) = glyph::raster_string(&self.fonts, glyph, size) else {
            return;
        };

        let (sin, cos) = rotation.to_radians().sin_cos();
        // Destination bounds: the raster's corners rotated about the anchor.
        let corners = [
            (raster.origin_x, raster.origin_y),
            (raster.origin_x + raster.width() as f64, raster.origin_y),
            (raster.origin_x, raster.origin_y + raster.height() as f64),
            (
                raster.origin_x + raster.width() as f64,
                raster.origin_y + raster.height() as f64,
            ),
        ];
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for (cx, cy) in corners {
            let rx = anchor.x + cx * cos - cy * sin;
            let ry = anchor.y + cx * sin + cy * cos;
            min_x = min_x.min(rx);
            min_y = min_y.min(ry);
            max_x = max_x.max(rx);
            max_y = max_y.max(ry);
        }

        let min_px = (min_x.floor() as i64).max(0);
        let max_px = (max_x.ceil() as i64).min(self.image.width() as i64 - 1);
        let min_py = (min_y.floor() as i64).max(0);
        let max_py = (max_y.ceil() as i64).min(self.image.height() as i64 - 1);

        for py in min_py..=max_py {
            for px in min_px..=max_px {
                // Inverse-rotate the destination pixel into glyph space.
                let dx = px as f64 + 0.5 - anchor.x;
                let dy = py as f64 + 0.5 - anchor.y;
                let gx = dx * cos + dy * sin;
                let gy = -dx * sin + dy * cos;
                let coverage = raster.sample(gx - raster.origin_x, gy - raster.origin_y);
                if coverage > 0.0 {
                    let alpha = (color.a as f32 * coverage).round().clamp(0.0, 255.0) as u8;
                    self.blend_pixel(px, py, color.with_alpha(alpha));
                }
            }
        }
    }
}
