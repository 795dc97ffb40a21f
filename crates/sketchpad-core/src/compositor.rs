//! Clears and repaints a surface from the command log.

use crate::command::Rgba;
use crate::history::CommandLog;
use crate::preview::Preview;
use crate::surface::DrawSurface;

/// Replays committed content, and transiently the live preview, onto a
/// drawing surface. Stateless apart from the background color.
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    pub background: Rgba,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(Rgba::white())
    }
}

impl Compositor {
    pub fn new(background: Rgba) -> Self {
        Self { background }
    }

    /// Full repaint: blank the whole surface, then replay the log in
    /// commit order. Never a partial clear, never a diff.
    pub fn redraw(&self, history: &CommandLog, surface: &mut dyn DrawSurface) {
        surface.clear(self.background);
        history.replay(surface);
    }

    /// Paint the live preview over an already-redrawn surface.
    ///
    /// Preview output never enters the log; it has to be repainted on
    /// every frame it is visible.
    pub fn overlay(&self, preview: Option<&Preview>, surface: &mut dyn DrawSurface) {
        if let Some(preview) = preview {
            preview.render(surface);
        }
    }
}
