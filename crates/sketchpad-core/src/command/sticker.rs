//! Glyph sticker placement.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use super::Rgba;
use crate::surface::DrawSurface;

/// A glyph stamped onto the canvas.
///
/// Unlike a stroke, a sticker commits on pointer-press. Its position
/// keeps tracking the pointer until the gesture ends; glyph, size, and
/// rotation stay as captured from the tool at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerPlacement {
    /// The glyph string to stamp (usually a single emoji).
    pub glyph: String,
    /// Current placement position.
    pub position: Point,
    /// Font size in live-canvas pixels.
    pub size: f64,
    /// Rotation in degrees about the placement position.
    pub rotation: f64,
}

impl StickerPlacement {
    pub fn new(glyph: impl Into<String>, position: Point, size: f64, rotation: f64) -> Self {
        Self {
            glyph: glyph.into(),
            position,
            size,
            rotation,
        }
    }

    /// Track the pointer to a new position.
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    /// Stamp the glyph, rotated about its own position so the rotation
    /// never displaces it.
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        surface.fill_glyph(
            &self.glyph,
            self.position,
            self.size,
            self.rotation,
            Rgba::black(),
        );
    }
}
