//! Sketch Pad core library
//!
//! Platform-agnostic command model, history, and input choreography for
//! the Sketch Pad drawing canvas. Rendering backends and UI shells live
//! in sibling crates and talk to this one through [`DrawSurface`] and
//! [`DrawingSession`].

pub mod command;
pub mod compositor;
pub mod history;
pub mod preview;
pub mod session;
pub mod surface;
pub mod tools;

pub use command::{Command, Rgba, StickerPlacement, Stroke};
pub use compositor::Compositor;
pub use history::CommandLog;
pub use preview::{MarkerPreview, Preview, StickerPreview};
pub use session::DrawingSession;
pub use surface::DrawSurface;
pub use tools::Tool;
