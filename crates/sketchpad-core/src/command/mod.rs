//! Drawing commands: the replayable units of committed work.

mod sticker;
mod stroke;

pub use sticker::StickerPlacement;
pub use stroke::Stroke;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::surface::DrawSurface;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Same color with the alpha channel replaced.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A committed, replayable drawing action.
///
/// A closed set of variants: advancement and rendering dispatch over the
/// tag, so adding a variant fails to compile until every match arm
/// handles it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Stroke(Stroke),
    Sticker(StickerPlacement),
}

impl Command {
    /// Extend the command with a new pointer position.
    ///
    /// A stroke appends the point to its path; a sticker moves to it.
    pub fn advance(&mut self, point: Point) {
        match self {
            Command::Stroke(stroke) => stroke.add_point(point),
            Command::Sticker(sticker) => sticker.move_to(point),
        }
    }

    /// Draw the committed state onto the surface.
    ///
    /// Everything a render needs (width, color, size, rotation, glyph)
    /// was snapshotted at construction; no external mutable context is
    /// consulted.
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        match self {
            Command::Stroke(stroke) => stroke.render(surface),
            Command::Sticker(sticker) => sticker.render(surface),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{RecordingSurface, SurfaceOp};

    #[test]
    fn advance_dispatches_per_variant() {
        let mut stroke = Command::Stroke(Stroke::new(Point::new(0.0, 0.0), 2.0, Rgba::black()));
        stroke.advance(Point::new(5.0, 5.0));
        match &stroke {
            Command::Stroke(s) => assert_eq!(s.points.len(), 2),
            _ => unreachable!(),
        }

        let mut sticker = Command::Sticker(StickerPlacement::new(
            "*",
            Point::new(1.0, 1.0),
            24.0,
            0.0,
        ));
        sticker.advance(Point::new(9.0, 4.0));
        match &sticker {
            Command::Sticker(s) => assert_eq!(s.position, Point::new(9.0, 4.0)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn render_is_pure_replay() {
        let mut command = Command::Stroke(Stroke::new(Point::new(0.0, 0.0), 2.0, Rgba::black()));
        command.advance(Point::new(10.0, 0.0));

        let mut first = RecordingSurface::default();
        let mut second = RecordingSurface::default();
        command.render(&mut first);
        command.render(&mut second);
        assert_eq!(first.ops, second.ops);
        assert!(matches!(first.ops[0], SurfaceOp::Polyline { .. }));
    }
}
