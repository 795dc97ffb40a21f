//! Transient tool feedback drawn over the committed content.

use kurbo::Point;

use crate::command::Rgba;
use crate::surface::DrawSurface;

/// Fill alpha that distinguishes a sticker that is not yet placed.
const STICKER_PREVIEW_ALPHA: u8 = 96;

/// Circular brush-size cursor for the marker tool.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPreview {
    pub position: Point,
    /// Diameter of the indicator, equal to the marker width.
    pub width: f64,
    pub color: Rgba,
}

/// Translucent glyph tracking the pointer between sticker placements.
#[derive(Debug, Clone, PartialEq)]
pub struct StickerPreview {
    pub position: Point,
    pub glyph: String,
    pub size: f64,
    pub rotation: f64,
}

/// Live, non-committed feedback for the current tool.
///
/// Never enters the command log; discarded and rebuilt whole on every
/// tool change so new width/color/rotation take effect at the next
/// overlay render.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Marker(MarkerPreview),
    Sticker(StickerPreview),
}

impl Preview {
    /// Track the pointer to a new position.
    pub fn move_to(&mut self, position: Point) {
        match self {
            Preview::Marker(preview) => preview.position = position,
            Preview::Sticker(preview) => preview.position = position,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Preview::Marker(preview) => preview.position,
            Preview::Sticker(preview) => preview.position,
        }
    }

    /// Draw the preview on top of an already-repainted surface.
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        match self {
            Preview::Marker(preview) => {
                surface.stroke_circle(preview.position, preview.width / 2.0, 1.0, preview.color);
            }
            Preview::Sticker(preview) => {
                surface.fill_glyph(
                    &preview.glyph,
                    preview.position,
                    preview.size,
                    preview.rotation,
                    Rgba::black().with_alpha(STICKER_PREVIEW_ALPHA),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{RecordingSurface, SurfaceOp};

    #[test]
    fn marker_preview_is_an_unfilled_circle_of_brush_diameter() {
        let preview = Preview::Marker(MarkerPreview {
            position: Point::new(40.0, 40.0),
            width: 6.0,
            color: Rgba::new(200, 0, 0, 255),
        });
        let mut surface = RecordingSurface::default();
        preview.render(&mut surface);
        assert_eq!(
            surface.ops,
            vec![SurfaceOp::Circle {
                center: Point::new(40.0, 40.0),
                radius: 3.0,
                width: 1.0,
                color: Rgba::new(200, 0, 0, 255),
            }]
        );
    }

    #[test]
    fn sticker_preview_is_translucent() {
        let preview = Preview::Sticker(StickerPreview {
            position: Point::new(10.0, 20.0),
            glyph: "✨".to_string(),
            size: 24.0,
            rotation: 15.0,
        });
        let mut surface = RecordingSurface::default();
        preview.render(&mut surface);
        match &surface.ops[0] {
            SurfaceOp::Glyph {
                color, rotation, ..
            } => {
                assert!(color.a < 255);
                assert_eq!(*rotation, 15.0);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn move_to_tracks_the_pointer() {
        let mut preview = Preview::Marker(MarkerPreview {
            position: Point::new(0.0, 0.0),
            width: 2.0,
            color: Rgba::black(),
        });
        preview.move_to(Point::new(7.0, 9.0));
        assert_eq!(preview.position(), Point::new(7.0, 9.0));
    }
}
