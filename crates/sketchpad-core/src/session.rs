//! Input choreography: maps the raw pointer stream onto log and preview
//! mutations, and tells the outside world when to repaint.

use kurbo::Point;

use crate::history::CommandLog;
use crate::preview::Preview;
use crate::tools::Tool;

type Observer = Box<dyn FnMut()>;

/// Pointer gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Gesture {
    /// No press is active. With the sticker tool selected this is the
    /// armed state: the next press stamps immediately.
    #[default]
    Idle,
    /// A marker press is active; the newest log entry is the live stroke.
    StrokeActive,
    /// A sticker press is still held; the already-committed placement
    /// keeps following the pointer until release freezes it.
    StickerHeld,
}

/// Process-wide drawing state, owned by the UI collaborator and passed
/// into every core operation.
///
/// All mutation happens synchronously inside one of the entry points
/// below, on a single logical thread: observers fire before the entry
/// point returns and always observe the fully updated log and preview.
#[derive(Default)]
pub struct DrawingSession {
    history: CommandLog,
    preview: Option<Preview>,
    tool: Tool,
    gesture: Gesture,
    pointer: Option<Point>,
    content_observers: Vec<Observer>,
    preview_observers: Vec<Observer>,
}

impl DrawingSession {
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            ..Self::default()
        }
    }

    pub fn history(&self) -> &CommandLog {
        &self.history
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Register an observer for "committed content changed": the caller
    /// must clear and replay the whole log.
    pub fn on_content_changed(&mut self, observer: impl FnMut() + 'static) {
        self.content_observers.push(Box::new(observer));
    }

    /// Register an observer for "only the preview moved": the caller
    /// must replay the log and then draw the preview overlay.
    pub fn on_preview_moved(&mut self, observer: impl FnMut() + 'static) {
        self.preview_observers.push(Box::new(observer));
    }

    fn emit_content_changed(&mut self) {
        for observer in &mut self.content_observers {
            observer();
        }
    }

    fn emit_preview_moved(&mut self) {
        for observer in &mut self.preview_observers {
            observer();
        }
    }

    /// Replace the current tool.
    ///
    /// The old preview is discarded and rebuilt from the new tool at the
    /// last known pointer position, so a new width, color, or rotation
    /// is visible at the next overlay render.
    pub fn set_tool(&mut self, tool: Tool) {
        log::debug!("tool selected: {tool:?}");
        self.tool = tool;
        self.preview = self.pointer.map(|at| self.tool.make_preview(at));
        self.emit_preview_moved();
    }

    /// Pointer press at surface-local coordinates.
    ///
    /// Marker: seeds a stroke into the log and enters the drag state.
    /// Sticker: commits the placement immediately (single-shot); the
    /// content signal is delivered synchronously, so the stamp is
    /// visible before this call returns and before any pointer-move.
    pub fn pointer_pressed(&mut self, x: f64, y: f64) {
        let at = Point::new(x, y);
        self.pointer = Some(at);
        let command = self.tool.begin_command(at);
        match &self.tool {
            Tool::Sticker { .. } => {
                self.history.push(command);
                if let Some(preview) = &mut self.preview {
                    preview.move_to(at);
                }
                self.gesture = Gesture::StickerHeld;
                self.emit_content_changed();
            }
            Tool::Marker { .. } => {
                self.history.push(command);
                // The live stroke is its own feedback; no brush cursor
                // while dragging.
                self.preview = None;
                self.gesture = Gesture::StrokeActive;
                self.emit_content_changed();
            }
        }
    }

    /// Pointer movement at surface-local coordinates.
    ///
    /// Always tracks the live preview first. While a gesture is active
    /// the newest command follows too: a stroke grows a point, a held
    /// sticker is repositioned. A move with no active gesture is never
    /// an error; it only moves the preview.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        let at = Point::new(x, y);
        self.pointer = Some(at);
        if let Some(preview) = &mut self.preview {
            preview.move_to(at);
        }
        match self.gesture {
            Gesture::StrokeActive | Gesture::StickerHeld => {
                if let Some(command) = self.history.last_mut() {
                    command.advance(at);
                }
                self.emit_content_changed();
            }
            Gesture::Idle => self.emit_preview_moved(),
        }
    }

    /// Pointer release: the gesture ends and its command is frozen (by
    /// ceasing to advance it).
    ///
    /// A finished stroke brings the brush cursor back where it ended.
    /// A held sticker was already committed and painted at press, so
    /// nothing visible changes and no signal fires.
    pub fn pointer_released(&mut self) {
        match self.gesture {
            Gesture::StrokeActive => {
                self.gesture = Gesture::Idle;
                self.preview = self.pointer.map(|at| self.tool.make_preview(at));
                self.emit_content_changed();
            }
            Gesture::StickerHeld => self.gesture = Gesture::Idle,
            Gesture::Idle => {}
        }
    }

    /// Take back the newest command. No-op, no signal, on an empty log.
    pub fn undo(&mut self) {
        self.gesture = Gesture::Idle;
        if self.history.undo() {
            self.emit_content_changed();
        }
    }

    /// Reapply the most recently undone command. No-op, no signal, when
    /// there is nothing to redo.
    pub fn redo(&mut self) {
        self.gesture = Gesture::Idle;
        if self.history.redo() {
            self.emit_content_changed();
        }
    }

    /// Wipe the canvas: both history stacks are emptied.
    pub fn clear(&mut self) {
        log::debug!("canvas cleared");
        self.gesture = Gesture::Idle;
        self.history.clear();
        self.emit_content_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, Rgba};
    use std::cell::Cell;
    use std::rc::Rc;

    fn marker() -> Tool {
        Tool::Marker {
            width: 2.0,
            color: Rgba::black(),
        }
    }

    fn sticker(glyph: &str) -> Tool {
        Tool::Sticker {
            glyph: glyph.to_string(),
            size: 24.0,
            rotation: 0.0,
        }
    }

    fn counters(session: &mut DrawingSession) -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let content = Rc::new(Cell::new(0));
        let preview = Rc::new(Cell::new(0));
        let c = content.clone();
        session.on_content_changed(move || c.set(c.get() + 1));
        let p = preview.clone();
        session.on_preview_moved(move || p.set(p.get() + 1));
        (content, preview)
    }

    #[test]
    fn drag_records_one_stroke_with_all_points() {
        let mut session = DrawingSession::new(marker());
        session.pointer_pressed(10.0, 10.0);
        session.pointer_moved(20.0, 20.0);
        session.pointer_moved(30.0, 10.0);
        session.pointer_released();

        assert_eq!(session.history().len(), 1);
        assert!(!session.history().can_redo());
        match &session.history().commands()[0] {
            Command::Stroke(stroke) => {
                assert_eq!(
                    stroke.points,
                    vec![
                        Point::new(10.0, 10.0),
                        Point::new(20.0, 20.0),
                        Point::new(30.0, 10.0),
                    ]
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn release_freezes_the_stroke() {
        let mut session = DrawingSession::new(marker());
        session.pointer_pressed(0.0, 0.0);
        session.pointer_moved(5.0, 5.0);
        session.pointer_released();
        session.pointer_moved(50.0, 50.0);

        match &session.history().commands()[0] {
            Command::Stroke(stroke) => assert_eq!(stroke.points.len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn undo_redo_round_trip_restores_the_log() {
        let mut session = DrawingSession::new(marker());
        for x in [0.0, 40.0, 80.0] {
            session.pointer_pressed(x, 0.0);
            session.pointer_moved(x + 10.0, 10.0);
            session.pointer_released();
        }
        let before = session.history().clone();

        session.undo();
        session.undo();
        session.redo();
        session.redo();

        assert_eq!(*session.history(), before);
    }

    #[test]
    fn two_strokes_then_undo_moves_newest_to_redo() {
        let mut session = DrawingSession::new(marker());
        for x in [0.0, 40.0] {
            session.pointer_pressed(x, 0.0);
            session.pointer_moved(x + 10.0, 10.0);
            session.pointer_released();
        }

        session.undo();
        assert_eq!(session.history().len(), 1);
        assert!(session.history().can_redo());
    }

    #[test]
    fn new_stroke_after_undo_discards_redo() {
        let mut session = DrawingSession::new(marker());
        session.pointer_pressed(0.0, 0.0);
        session.pointer_moved(10.0, 10.0);
        session.pointer_released();
        session.undo();
        assert!(session.history().can_redo());

        session.pointer_pressed(20.0, 20.0);
        assert!(!session.history().can_redo());
    }

    #[test]
    fn undo_redo_on_empty_state_signal_nothing() {
        let mut session = DrawingSession::new(marker());
        let (content, preview) = counters(&mut session);

        session.undo();
        session.redo();
        assert_eq!(content.get(), 0);
        assert_eq!(preview.get(), 0);
    }

    #[test]
    fn sticker_commits_and_paints_at_press_time() {
        let mut session = DrawingSession::new(sticker("✨"));
        let (content, _) = counters(&mut session);

        session.pointer_pressed(50.0, 50.0);
        // Committed and signaled before any move or release.
        assert_eq!(content.get(), 1);
        assert_eq!(session.history().len(), 1);
        match &session.history().commands()[0] {
            Command::Sticker(placement) => {
                assert_eq!(placement.glyph, "✨");
                assert_eq!(placement.position, Point::new(50.0, 50.0));
            }
            other => panic!("unexpected command {other:?}"),
        }

        session.pointer_released();
        assert_eq!(content.get(), 1);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn moves_outside_a_gesture_only_move_the_preview() {
        let mut session = DrawingSession::new(marker());
        session.pointer_moved(5.0, 5.0);
        session.set_tool(marker());
        let (content, preview) = counters(&mut session);

        session.pointer_moved(6.0, 6.0);
        assert_eq!(content.get(), 0);
        assert_eq!(preview.get(), 1);
        assert!(session.history().is_empty());
        assert_eq!(
            session.preview().map(|p| p.position()),
            Some(Point::new(6.0, 6.0))
        );
    }

    #[test]
    fn marker_preview_hidden_while_dragging_and_rebuilt_on_release() {
        let mut session = DrawingSession::new(marker());
        session.pointer_moved(5.0, 5.0);
        session.set_tool(marker());
        assert!(session.preview().is_some());

        session.pointer_pressed(5.0, 5.0);
        assert!(session.preview().is_none());
        session.pointer_moved(15.0, 15.0);
        assert!(session.preview().is_none());

        session.pointer_released();
        let preview = session.preview().expect("preview rebuilt on release");
        assert_eq!(preview.position(), Point::new(15.0, 15.0));
        assert!(matches!(preview, Preview::Marker(_)));
    }

    #[test]
    fn held_sticker_follows_the_pointer_until_release() {
        let mut session = DrawingSession::new(sticker("✨"));
        session.pointer_pressed(50.0, 50.0);
        session.pointer_moved(70.0, 30.0);

        match &session.history().commands()[0] {
            Command::Sticker(placement) => {
                assert_eq!(placement.position, Point::new(70.0, 30.0));
            }
            other => panic!("unexpected command {other:?}"),
        }

        session.pointer_released();
        session.pointer_moved(90.0, 90.0);
        match &session.history().commands()[0] {
            Command::Sticker(placement) => {
                // Frozen at the release position, no longer tracking.
                assert_eq!(placement.position, Point::new(70.0, 30.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn sticker_preview_keeps_tracking_between_placements() {
        let mut session = DrawingSession::new(marker());
        session.pointer_moved(5.0, 5.0);
        session.set_tool(sticker("⭐"));
        session.pointer_pressed(10.0, 10.0);
        session.pointer_released();

        session.pointer_moved(60.0, 60.0);
        let preview = session.preview().expect("sticker preview stays live");
        assert!(matches!(preview, Preview::Sticker(_)));
        assert_eq!(preview.position(), Point::new(60.0, 60.0));
    }

    #[test]
    fn set_tool_rebuilds_preview_with_new_parameters() {
        let mut session = DrawingSession::new(marker());
        session.pointer_moved(5.0, 5.0);

        session.set_tool(Tool::Marker {
            width: 8.0,
            color: Rgba::new(9, 9, 9, 255),
        });
        match session.preview() {
            Some(Preview::Marker(preview)) => {
                assert_eq!(preview.width, 8.0);
                assert_eq!(preview.position, Point::new(5.0, 5.0));
            }
            other => panic!("unexpected preview {other:?}"),
        }

        session.set_tool(sticker("✨"));
        assert!(matches!(session.preview(), Some(Preview::Sticker(_))));
    }

    #[test]
    fn undo_during_a_drag_cancels_the_gesture() {
        let mut session = DrawingSession::new(marker());
        session.pointer_pressed(0.0, 0.0);
        session.pointer_moved(10.0, 10.0);

        session.undo();
        assert!(session.history().is_empty());

        // Further moves must not resurrect or corrupt anything.
        session.pointer_moved(20.0, 20.0);
        assert!(session.history().is_empty());
    }

    #[test]
    fn clear_signals_even_when_already_empty() {
        let mut session = DrawingSession::new(marker());
        let (content, _) = counters(&mut session);
        session.clear();
        assert_eq!(content.get(), 1);
    }
}
