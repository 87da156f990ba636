//! Undo/redo history for color edits.
//!
//! History is snapshot based: before each edit the session records the
//! complete [`ColorState`] together with a description of the edit. Undoing
//! restores that snapshot in one batch, so renderers see a single color
//! update per undo or redo.

use crate::constants::UNDO_HISTORY_LIMIT;
use crate::model::{ColorMode, ColorModel, ColorState, Field};

// ============================================================================
// Undo Stack
// ============================================================================

/// Generic bounded undo stack for any cloneable state.
///
/// Maintains two stacks:
/// - `undo_stack`: states that can be returned to (most recent at the end)
/// - `redo_stack`: states that were undone (most recent at the end)
#[derive(Debug, Clone)]
pub struct UndoStack<T: Clone> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    max_history: usize,
}

impl<T: Clone> Default for UndoStack<T> {
    fn default() -> Self {
        Self::new(UNDO_HISTORY_LIMIT)
    }
}

impl<T: Clone> UndoStack<T> {
    /// Create an empty stack holding at most `max_history` undo steps.
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history: max_history.max(1),
        }
    }

    /// Push a state to the undo stack (call this BEFORE making a change).
    ///
    /// This clears the redo stack since a new change invalidates the redo history.
    pub fn push(&mut self, state: T) {
        self.undo_stack.push(state);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.max_history {
            let excess = self.undo_stack.len() - self.max_history;
            self.undo_stack.drain(..excess);
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The state `undo` would return, if any.
    pub fn peek_undo(&self) -> Option<&T> {
        self.undo_stack.last()
    }

    /// The state `redo` would return, if any.
    pub fn peek_redo(&self) -> Option<&T> {
        self.redo_stack.last()
    }

    /// Undo: returns the previous state, or None if nothing to undo.
    ///
    /// The current state must be passed so it can be pushed to the redo stack.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let prev = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(prev)
    }

    /// Redo: returns the next state, or None if nothing to redo.
    ///
    /// The current state must be passed so it can be pushed to the undo stack.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    /// Get number of undo steps available
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get number of redo steps available
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

// ============================================================================
// Color Actions
// ============================================================================

/// An undoable edit, used to label undo/redo controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// A slider or text field changed one field
    SetField {
        /// Field that changed
        field: Field,
        /// Mode at the time of the edit, for the label
        mode: ColorMode,
    },
    /// Mode flag flipped, values reinterpreted
    SetMode(ColorMode),
    /// Mode changed with values converted
    ConvertMode(ColorMode),
    /// Random color
    Shuffle,
}

impl Action {
    /// Get a human-readable description of this action
    pub fn description(&self) -> String {
        match self {
            Action::SetField { field, mode } => {
                format!("Change {}", field.label(*mode).to_lowercase())
            }
            Action::SetMode(mode) => format!("Switch to {}", mode.name()),
            Action::ConvertMode(mode) => format!("Convert to {}", mode.name()),
            Action::Shuffle => "Shuffle".to_string(),
        }
    }
}

/// A recorded state plus the label of the action that left it.
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    state: ColorState,
    description: String,
}

// ============================================================================
// Color History
// ============================================================================

/// Undo/redo history bound to a [`ColorModel`].
#[derive(Debug, Clone, Default)]
pub struct ColorHistory {
    stack: UndoStack<Snapshot>,
}

impl ColorHistory {
    /// Create a history holding at most `max_history` steps.
    pub fn new(max_history: usize) -> Self {
        Self {
            stack: UndoStack::new(max_history),
        }
    }

    /// Record the state from before `action` was applied.
    pub fn record(&mut self, before: ColorState, action: Action) {
        let description = action.description();
        log::debug!("📝 Undo: pushed '{}'", description);
        self.stack.push(Snapshot {
            state: before,
            description,
        });
    }

    /// Restore the state before the most recent action.
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self, model: &ColorModel) -> bool {
        let Some(description) = self.stack.peek_undo().map(|s| s.description.clone()) else {
            return false;
        };
        let current = Snapshot {
            state: model.state(),
            description,
        };
        let Some(previous) = self.stack.undo(current) else {
            return false;
        };

        log::debug!("⏪ Undo: '{}'", previous.description);
        model.restore(previous.state);
        true
    }

    /// Re-apply the most recently undone action.
    /// Returns false if there was nothing to redo.
    pub fn redo(&mut self, model: &ColorModel) -> bool {
        let Some(description) = self.stack.peek_redo().map(|s| s.description.clone()) else {
            return false;
        };
        let current = Snapshot {
            state: model.state(),
            description,
        };
        let Some(next) = self.stack.redo(current) else {
            return false;
        };

        log::debug!("⏩ Redo: '{}'", next.description);
        model.restore(next.state);
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.stack.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.stack.can_redo()
    }

    /// Label of the action that would be undone
    pub fn undo_description(&self) -> Option<&str> {
        self.stack.peek_undo().map(|s| s.description.as_str())
    }

    /// Label of the action that would be redone
    pub fn redo_description(&self) -> Option<&str> {
        self.stack.peek_redo().map(|s| s.description.as_str())
    }

    /// Number of undo steps available
    pub fn undo_count(&self) -> usize {
        self.stack.undo_count()
    }

    /// Number of redo steps available
    pub fn redo_count(&self) -> usize {
        self.stack.redo_count()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.stack.clear();
        log::debug!("🗑️ Undo history cleared");
    }
}

// ============================================================================
// Tests
// ============================================================================
