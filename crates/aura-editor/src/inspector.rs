//! Inspector session: the live document plus its history and persistence.
//!
//! Every document replacement (edit, undo, redo, reset) goes through
//! `changed`, which reschedules the debounced write.

use crate::history::History;
use crate::mutation::{Field, Mutation, NestedField, mutations_for_design};
use crate::persist::{Clock, Millis, Persistence, Store, SystemClock};
use crate::shortcuts::ShortcutAction;
use aura_core::{Document, PartialDocument, emit_classes, emit_markup};

pub struct Inspector<S: Store, C: Clock = SystemClock> {
    document: Document,
    history: History,
    persistence: Persistence<S>,
    clock: C,
}

impl<S: Store> Inspector<S> {
    /// Open a session on `store`, restoring any saved document.
    pub fn with_store(store: S) -> Self {
        Self::new(Persistence::new(store), SystemClock::default())
    }
}

impl<S: Store, C: Clock> Inspector<S, C> {
    pub fn new(persistence: Persistence<S>, clock: C) -> Self {
        let document = persistence.load();
        Self {
            document,
            history: History::default(),
            persistence,
            clock,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut Persistence<S> {
        &mut self.persistence
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    pub fn set_field(&mut self, field: Field) {
        self.apply(Mutation::Set(field));
    }

    pub fn set_nested_field(&mut self, field: NestedField) {
        self.apply(Mutation::SetNested(field));
    }

    /// Apply one edit as one undo step. Forward history is dropped.
    pub fn apply(&mut self, mutation: Mutation) {
        let before = self.document.clone();
        mutation.apply(&mut self.document);
        self.history.record(before);
        self.changed();
    }

    /// Fold a generated design into the document, one undo step per
    /// present field. Returns the number of edits applied.
    pub fn apply_design(&mut self, design: &PartialDocument) -> usize {
        let mutations = mutations_for_design(design);
        let count = mutations.len();
        for m in mutations {
            self.apply(m);
        }
        log::debug!("applied generated design ({count} edits)");
        count
    }

    pub fn undo(&mut self) -> bool {
        let stepped = self.history.undo(&mut self.document);
        if stepped {
            log::debug!("undo ({} left)", self.history.undo_len());
            self.changed();
        }
        stepped
    }

    pub fn redo(&mut self) -> bool {
        let stepped = self.history.redo(&mut self.document);
        if stepped {
            log::debug!("redo ({} left)", self.history.redo_len());
            self.changed();
        }
        stepped
    }

    /// Return to the default document. The reset is undoable, forward
    /// history survives it, and stored state is deleted at once.
    pub fn reset(&mut self) {
        let before = std::mem::take(&mut self.document);
        self.history.record_keep_redo(before);
        self.persistence.clear();
        log::debug!("reset to defaults");
        self.changed();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn handle_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Commit the pending write if it is due.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.persistence.tick(now)
    }

    /// Like [`tick`](Self::tick) with a host-supplied time.
    pub fn tick_at(&mut self, now: Millis) -> bool {
        self.persistence.tick(now)
    }

    pub fn flush(&mut self) -> bool {
        self.persistence.flush()
    }

    fn changed(&mut self) {
        let now = self.clock.now_ms();
        self.persistence.schedule(&self.document, now);
    }

    // ─── Projection ──────────────────────────────────────────────────────

    pub fn generated_classes(&self) -> String {
        emit_classes(&self.document)
    }

    /// Markup for the current document. A non-empty class override wins
    /// over the generated classes.
    pub fn generated_markup(&self) -> String {
        let classes = if self.document.tailwind_classes.trim().is_empty() {
            self.generated_classes()
        } else {
            self.document.tailwind_classes.clone()
        };
        emit_markup(&self.document, &classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{Side, TransformKey};
    use crate::persist::{ManualClock, MemoryStore};
    use aura_core::ElementTag;
    use pretty_assertions::assert_eq;

    fn inspector() -> Inspector<MemoryStore, ManualClock> {
        Inspector::new(Persistence::new(MemoryStore::new()), ManualClock::new(0))
    }

    #[test]
    fn edit_records_history() {
        let mut insp = inspector();
        insp.set_field(Field::ElementTag(ElementTag::Section));
        assert_eq!(insp.document().element_tag, ElementTag::Section);
        assert!(insp.can_undo());
        assert!(!insp.can_redo());
        assert_eq!(insp.history_len(), 1);
    }

    #[test]
    fn undo_redo_roundtrip() {
        let mut insp = inspector();
        insp.set_nested_field(NestedField::Padding(Side::Top, "4".into()));
        assert!(insp.undo());
        assert_eq!(insp.document(), &Document::default());
        assert!(insp.redo());
        assert_eq!(insp.document().padding.top, "4");
        assert!(!insp.redo());
    }

    #[test]
    fn reset_keeps_redo() {
        let mut insp = inspector();
        insp.set_field(Field::Blur(4.0));
        insp.set_field(Field::Blur(8.0));
        insp.undo();
        insp.reset();

        assert_eq!(insp.document(), &Document::default());
        assert!(insp.can_redo());
        assert!(insp.undo());
        assert_eq!(insp.document().blur, 4.0);
    }

    #[test]
    fn apply_design_steps_per_field() {
        let mut insp = inspector();
        let design = PartialDocument::from_json(
            r#"{"elementTag":"button","transforms":{"scale":110,"rotate":5}}"#,
        )
        .unwrap();
        assert_eq!(insp.apply_design(&design), 3);
        assert_eq!(insp.history_len(), 3);
        assert_eq!(insp.document().transforms.scale, 110.0);

        insp.undo();
        assert_eq!(insp.document().transforms.rotate, 5.0);
        assert_eq!(insp.document().transforms.scale, 100.0);
    }

    #[test]
    fn generated_gradient_drops_stale_angle() {
        let mut insp = inspector();
        let first = PartialDocument::from_json(
            r##"{"background":{"type":"linear","gradient":{"from":"#111","to":"#222","angle":45}}}"##,
        )
        .unwrap();
        insp.apply_design(&first);
        assert!(insp.generated_classes().contains("linear-gradient(45deg,#111,#222)"));

        let second = PartialDocument::from_json(
            r##"{"background":{"gradient":{"from":"#000000","to":"#ffffff"}}}"##,
        )
        .unwrap();
        insp.apply_design(&second);
        assert_eq!(insp.document().background.gradient.as_ref().and_then(|g| g.angle), None);
        assert!(
            insp.generated_classes()
                .contains("[background:linear-gradient(90deg,#000000,#ffffff)]")
        );
    }

    #[test]
    fn markup_prefers_class_override() {
        let mut insp = inspector();
        assert!(insp.generated_markup().contains(aura_core::DEFAULT_TAILWIND_CLASSES));

        insp.set_field(Field::TailwindClasses(String::new()));
        assert_eq!(
            insp.generated_markup(),
            format!("<h2 class=\"{}\">\n  Layers\n</h2>", insp.generated_classes())
        );
    }

    #[test]
    fn shortcuts_drive_history() {
        let mut insp = inspector();
        insp.set_nested_field(NestedField::Transforms(TransformKey::Rotate, 30.0));
        assert!(insp.handle_shortcut(ShortcutAction::Undo));
        assert_eq!(insp.document().transforms.rotate, 0.0);
        assert!(insp.handle_shortcut(ShortcutAction::Redo));
        assert_eq!(insp.document().transforms.rotate, 30.0);
    }
}
