//! Undo/Redo snapshot history.
//!
//! Every edit stores the full pre-edit document on the undo stack. Undo
//! swaps the live document with the top snapshot and parks the replaced
//! one on the redo stack; redo does the reverse. Both stacks are bounded
//! ring buffers: pushing past capacity evicts the oldest snapshot.

use aura_core::Document;
use std::collections::VecDeque;

/// Maximum number of snapshots kept per stack.
pub const MAX_HISTORY: usize = 20;

/// Linear undo/redo stacks of document snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Document>,
    redo_stack: VecDeque<Document>,
    /// Maximum depth of each stack.
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: VecDeque::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Record the snapshot taken before a new edit. Forward history is
    /// invalidated.
    pub fn record(&mut self, before: Document) {
        push_bounded(&mut self.undo_stack, before, self.max_depth);
        self.redo_stack.clear();
    }

    /// Record a snapshot without invalidating forward history. Used by
    /// reset, which is undoable but leaves the redo stack alone.
    pub fn record_keep_redo(&mut self, before: Document) {
        push_bounded(&mut self.undo_stack, before, self.max_depth);
    }

    /// Step back. Returns `false` (and leaves `current` alone) when there
    /// is nothing to undo.
    pub fn undo(&mut self, current: &mut Document) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        let replaced = std::mem::replace(current, previous);
        push_bounded(&mut self.redo_stack, replaced, self.max_depth);
        true
    }

    /// Step forward. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, current: &mut Document) -> bool {
        let Some(next) = self.redo_stack.pop_back() else {
            return false;
        };
        let replaced = std::mem::replace(current, next);
        push_bounded(&mut self.undo_stack, replaced, self.max_depth);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Snapshots on the undo stack, oldest first.
    pub fn past(&self) -> impl Iterator<Item = &Document> {
        self.undo_stack.iter()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<Document>, doc: Document, max_depth: usize) {
    if max_depth == 0 {
        return;
    }
    if stack.len() == max_depth {
        stack.pop_front();
    }
    stack.push_back(doc);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_text(text: &str) -> Document {
        Document {
            text_content: text.into(),
            ..Document::default()
        }
    }

    #[test]
    fn undo_then_redo() {
        let mut history = History::default();
        let mut current = doc_with_text("b");
        history.record(doc_with_text("a"));

        assert!(history.undo(&mut current));
        assert_eq!(current.text_content, "a");
        assert!(history.can_redo());

        assert!(history.redo(&mut current));
        assert_eq!(current.text_content, "b");
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut history = History::default();
        let mut current = doc_with_text("x");
        assert!(!history.undo(&mut current));
        assert!(!history.redo(&mut current));
        assert_eq!(current.text_content, "x");
    }

    #[test]
    fn record_clears_redo() {
        let mut history = History::default();
        let mut current = doc_with_text("b");
        history.record(doc_with_text("a"));
        history.undo(&mut current);
        assert!(history.can_redo());

        history.record(current.clone());
        assert!(!history.can_redo());
    }

    #[test]
    fn record_keep_redo_preserves_forward_history() {
        let mut history = History::default();
        let mut current = doc_with_text("b");
        history.record(doc_with_text("a"));
        history.undo(&mut current);

        history.record_keep_redo(current.clone());
        assert!(history.can_redo());
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn max_depth_trims_oldest() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.record(doc_with_text(&i.to_string()));
        }
        let kept: Vec<_> = history.past().map(|d| d.text_content.as_str()).collect();
        assert_eq!(kept, ["2", "3", "4"]);
    }

    #[test]
    fn redo_pushes_respect_capacity() {
        let mut history = History::new(2);
        let mut current = doc_with_text("c");
        history.record(doc_with_text("a"));
        history.record(doc_with_text("b"));
        history.undo(&mut current);
        history.undo(&mut current);
        assert_eq!(history.redo_len(), 2);
        history.redo(&mut current);
        history.redo(&mut current);
        assert_eq!(history.undo_len(), 2);
        assert_eq!(current.text_content, "c");
    }
}
