//! Ordered history of committed commands with undo/redo stacks.

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::surface::DrawSurface;

/// The committed command sequence plus the alternate future produced by
/// undo.
///
/// Both fields act as stacks: commands enter and leave at the tail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandLog {
    applied: Vec<Command>,
    redo: Vec<Command>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a new command. Fresh work invalidates the redo buffer.
    pub fn push(&mut self, command: Command) {
        self.applied.push(command);
        self.redo.clear();
    }

    /// Move the newest command onto the redo stack.
    ///
    /// Returns false, changing nothing, when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(command) = self.applied.pop() {
            self.redo.push(command);
            true
        } else {
            false
        }
    }

    /// Reapply the most recently undone command.
    ///
    /// Returns false, changing nothing, when the redo buffer is empty.
    pub fn redo(&mut self) -> bool {
        if let Some(command) = self.redo.pop() {
            self.applied.push(command);
            true
        } else {
            false
        }
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.applied.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    /// Committed commands, oldest first.
    pub fn commands(&self) -> &[Command] {
        &self.applied
    }

    /// The newest committed command, if any.
    ///
    /// The choreographer advances an active gesture through this.
    pub(crate) fn last_mut(&mut self) -> Option<&mut Command> {
        self.applied.last_mut()
    }

    /// Replay every committed command in order onto the surface.
    ///
    /// Read-only on the log; replaying twice produces the same calls.
    pub fn replay(&self, surface: &mut dyn DrawSurface) {
        for command in &self.applied {
            command.render(surface);
        }
    }
}
