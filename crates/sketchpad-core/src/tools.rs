//! Tool selection state.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::command::{Command, Rgba, StickerPlacement, Stroke};
use crate::preview::{MarkerPreview, Preview, StickerPreview};

/// The active drawing tool.
///
/// Color and rotation are chosen by the surrounding UI when the tool is
/// (re-)selected and captured into each command at creation time;
/// committed commands never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tool {
    /// Freehand marker with a fixed line width and color.
    Marker { width: f64, color: Rgba },
    /// Glyph stamp with a fixed size and rotation in degrees.
    Sticker {
        glyph: String,
        size: f64,
        rotation: f64,
    },
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Marker {
            width: 2.0,
            color: Rgba::black(),
        }
    }
}

impl Tool {
    pub fn is_marker(&self) -> bool {
        matches!(self, Tool::Marker { .. })
    }

    pub fn is_sticker(&self) -> bool {
        matches!(self, Tool::Sticker { .. })
    }

    /// Start the command this tool produces on pointer-press.
    pub fn begin_command(&self, at: Point) -> Command {
        match self {
            Tool::Marker { width, color } => Command::Stroke(Stroke::new(at, *width, *color)),
            Tool::Sticker {
                glyph,
                size,
                rotation,
            } => Command::Sticker(StickerPlacement::new(glyph.clone(), at, *size, *rotation)),
        }
    }

    /// Build the preview shown for this tool at a pointer position.
    pub fn make_preview(&self, at: Point) -> Preview {
        match self {
            Tool::Marker { width, color } => Preview::Marker(MarkerPreview {
                position: at,
                width: *width,
                color: *color,
            }),
            Tool::Sticker {
                glyph,
                size,
                rotation,
            } => Preview::Sticker(StickerPreview {
                position: at,
                glyph: glyph.clone(),
                size: *size,
                rotation: *rotation,
            }),
        }
    }
}
