//! Linear undo/redo timeline.
//!
//! `History` only does bookkeeping: it never applies or reverts a command.
//! The caller applies a command, hands it over with [`History::record`], and
//! later asks for it back through [`History::take_for_undo`] or
//! [`History::take_for_redo`] before invoking the matching effect itself.

use tracing::trace;

pub struct History<T> {
    edits: Vec<T>,
    undos: Vec<T>,

    undoable: bool,
    redoable: bool,
    after_search: bool,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self {
            edits: vec![],
            undos: vec![],
            undoable: false,
            redoable: false,
            after_search: false,
        }
    }

    /// Push a freshly executed command. Everything on the redo stack is
    /// dropped; there is only ever one branch.
    pub fn record(&mut self, edit: T, after_search: bool) {
        self.edits.push(edit);
        self.undos.clear();

        self.undoable = true;
        self.redoable = false;
        self.after_search = after_search;

        trace!(undo_len = self.edits.len(), after_search, "recorded edit");
    }

    /// Move the most recent command onto the redo stack and return it.
    ///
    /// # Panics
    ///
    /// When [`is_undoable`](Self::is_undoable) is false. Callers must check
    /// first.
    pub fn take_for_undo(&mut self) -> &T {
        assert!(self.undoable, "take_for_undo called with nothing to undo");
        let Some(edit) = self.edits.pop() else {
            panic!("take_for_undo called with an empty undo stack");
        };

        self.undos.push(edit);
        self.redoable = true;
        if self.edits.is_empty() {
            self.undoable = false;
        }

        trace!(undo_len = self.edits.len(), redo_len = self.undos.len(), "took edit for undo");
        &self.undos[self.undos.len() - 1]
    }

    /// Move the most recently undone command back onto the undo stack and
    /// return it.
    ///
    /// # Panics
    ///
    /// When [`is_redoable`](Self::is_redoable) is false.
    pub fn take_for_redo(&mut self) -> &T {
        assert!(self.redoable, "take_for_redo called with nothing to redo");
        let Some(edit) = self.undos.pop() else {
            panic!("take_for_redo called with an empty redo stack");
        };

        self.edits.push(edit);
        self.undoable = true;
        if self.undos.is_empty() {
            self.redoable = false;
        }

        trace!(undo_len = self.edits.len(), redo_len = self.undos.len(), "took edit for redo");
        &self.edits[self.edits.len() - 1]
    }

    pub fn is_undoable(&self) -> bool {
        self.undoable
    }

    pub fn is_redoable(&self) -> bool {
        self.redoable
    }

    /// Whether the last *recorded* command targeted a search view. Undo and
    /// redo leave this alone.
    pub fn is_after_search(&self) -> bool {
        self.after_search
    }

    /// Force the undo capability flag without touching the stack.
    ///
    /// The flag may disagree with the stack contents until the next
    /// `record`, `take_*` or `clear_*` call re-derives it. Forcing it true on
    /// an empty stack makes the next `take_for_undo` panic.
    pub fn set_undoable(&mut self, undoable: bool) {
        self.undoable = undoable;
    }

    /// Redo counterpart of [`set_undoable`](Self::set_undoable).
    pub fn set_redoable(&mut self, redoable: bool) {
        self.redoable = redoable;
    }

    pub fn clear_undo_stack(&mut self) {
        self.edits.clear();
        self.undoable = false;
    }

    pub fn clear_redo_stack(&mut self) {
        self.undos.clear();
        self.redoable = false;
    }

    pub fn undo_len(&self) -> usize {
        self.edits.len()
    }

    pub fn redo_len(&self) -> usize {
        self.undos.len()
    }

    /// The command the next undo would hand out.
    pub fn peek_undo(&self) -> Option<&T> {
        self.edits.last()
    }

    /// The command the next redo would hand out.
    pub fn peek_redo(&self) -> Option<&T> {
        self.undos.last()
    }
}
