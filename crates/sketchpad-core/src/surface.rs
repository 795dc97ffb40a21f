//! The seam between the command model and a concrete raster backend.

use kurbo::Point;

use crate::command::Rgba;

/// Drawing operations a command may invoke while replaying.
///
/// Coordinates are in live-canvas pixels. A backend that rasterizes at a
/// different resolution applies its own uniform scale, so the same
/// command log replays identically onto the on-screen surface and the
/// higher-resolution export surface.
pub trait DrawSurface {
    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Rgba);

    /// Trace a connected polyline through `points` in order.
    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba);

    /// Outline an unfilled circle (the marker brush cursor).
    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba);

    /// Paint a glyph string with its baseline-left corner at `anchor`,
    /// rotated by `rotation` degrees about the anchor itself.
    ///
    /// Implementations must scope the rotation and font state so that
    /// later operations on the surface are unaffected.
    fn fill_glyph(&mut self, glyph: &str, anchor: Point, size: f64, rotation: f64, color: Rgba);
}
