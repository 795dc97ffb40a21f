//! Freehand marker stroke.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use super::Rgba;
use crate::surface::DrawSurface;

/// A freehand stroke: an ordered run of points with a width and color
/// captured at creation time and never changed afterwards.
///
/// Points stay in temporal drawing order. The stroke grows while its
/// press gesture is active and is frozen on release; freezing is
/// enforced by the choreographer simply no longer advancing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Recorded positions, oldest first.
    pub points: Vec<Point>,
    /// Line width in live-canvas pixels.
    pub width: f64,
    /// Stroke color.
    pub color: Rgba,
}

impl Stroke {
    /// Begin a stroke from its seed point.
    pub fn new(seed: Point, width: f64, color: Rgba) -> Self {
        Self {
            points: vec![seed],
            width,
            color,
        }
    }

    /// Append the next pointer position.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Trace the stroke as a connected polyline.
    ///
    /// A single recorded point is not a visible mark; nothing is drawn
    /// until the second point arrives.
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        if self.points.len() < 2 {
            return;
        }
        surface.stroke_polyline(&self.points, self.width, self.color);
    }
}
