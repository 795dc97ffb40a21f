//! Sketch Pad rasterization backend.
//!
//! A CPU pixel surface implementing the core's [`DrawSurface`] seam,
//! plus the PNG export path that replays the committed log at a higher
//! fixed resolution.
//!
//! [`DrawSurface`]: sketchpad_core::DrawSurface

mod export;
mod glyph;
mod pixmap;

pub use export::{export_png, ExportError, ExportOptions, EXPORT_SIZE, LIVE_CANVAS_SIZE};
pub use pixmap::Pixmap;
