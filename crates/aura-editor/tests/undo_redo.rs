//! Integration tests: inspector history (aura-editor).
//!
//! Exercises edit / undo / redo / reset sequences through the `Inspector`
//! container, including the capacity bound and the reset asymmetry.

use aura_core::model::*;
use aura_editor::mutation::{Side, TransformKey};
use aura_editor::{Field, Inspector, ManualClock, MemoryStore, NestedField, Persistence};
use pretty_assertions::assert_eq;

fn make_inspector() -> Inspector<MemoryStore, ManualClock> {
    Inspector::new(Persistence::new(MemoryStore::new()), ManualClock::new(0))
}

fn rotate(deg: f64) -> NestedField {
    NestedField::Transforms(TransformKey::Rotate, deg)
}

// ─── Basic undo/redo ────────────────────────────────────────────────────

#[test]
fn n_edits_then_n_undos_restore_original() {
    let mut insp = make_inspector();
    let original = insp.document().clone();

    insp.set_field(Field::ElementTag(ElementTag::Article));
    insp.set_field(Field::TextContent("Hello".into()));
    insp.set_nested_field(NestedField::Padding(Side::Left, "8".into()));
    insp.set_field(Field::Opacity(40.0));
    insp.set_nested_field(rotate(90.0));

    for _ in 0..5 {
        assert!(insp.undo());
    }
    assert_eq!(insp.document(), &original);
    assert!(!insp.can_undo());
}

#[test]
fn redo_restores_undone_state() {
    let mut insp = make_inspector();
    insp.set_field(Field::TextContent("First".into()));
    insp.set_field(Field::TextContent("Second".into()));
    let after = insp.document().clone();

    insp.undo();
    assert_eq!(insp.document().text_content, "First");
    insp.redo();
    assert_eq!(insp.document(), &after);
}

#[test]
fn new_edit_after_undo_drops_redo() {
    let mut insp = make_inspector();
    insp.set_field(Field::Blur(2.0));
    insp.undo();
    assert!(insp.can_redo());

    insp.set_field(Field::Blur(6.0));
    assert!(!insp.can_redo());
    assert!(!insp.redo());
    assert_eq!(insp.document().blur, 6.0);
}

#[test]
fn undo_and_redo_on_empty_history_are_noops() {
    let mut insp = make_inspector();
    assert!(!insp.undo());
    assert!(!insp.redo());
    assert_eq!(insp.document(), &Document::default());
}

// ─── Capacity ───────────────────────────────────────────────────────────

#[test]
fn history_keeps_only_last_twenty() {
    let mut insp = make_inspector();
    for i in 1..=25 {
        insp.set_nested_field(rotate(i as f64));
    }
    assert_eq!(insp.history_len(), 20);

    for _ in 0..25 {
        insp.undo();
    }
    // The five oldest snapshots were evicted.
    assert_eq!(insp.document().transforms.rotate, 5.0);
}

#[test]
fn redo_stack_respects_capacity() {
    let mut insp = make_inspector();
    for i in 1..=25 {
        insp.set_nested_field(rotate(i as f64));
    }
    while insp.undo() {}
    assert_eq!(insp.history().redo_len(), 20);

    while insp.redo() {}
    assert_eq!(insp.document().transforms.rotate, 25.0);
    assert_eq!(insp.history_len(), 20);
}

// ─── Reset ──────────────────────────────────────────────────────────────

#[test]
fn reset_is_undoable_and_preserves_redo() {
    let mut insp = make_inspector();
    insp.set_field(Field::TextContent("A".into()));
    insp.set_field(Field::TextContent("B".into()));
    insp.undo();
    assert_eq!(insp.document().text_content, "A");

    insp.reset();
    assert_eq!(insp.document(), &Document::default());
    assert!(insp.can_redo(), "reset must not clear redo");

    insp.undo();
    assert_eq!(insp.document().text_content, "A");
}

#[test]
fn reset_redo_reaches_pre_undo_state() {
    let mut insp = make_inspector();
    insp.set_field(Field::TextContent("A".into()));
    insp.undo();
    insp.reset();

    // Redo jumps past the reset to the state the first undo left behind.
    assert!(insp.redo());
    assert_eq!(insp.document().text_content, "A");
}

// ─── Values ─────────────────────────────────────────────────────────────

#[test]
fn out_of_range_values_are_stored_unclamped() {
    let mut insp = make_inspector();
    insp.set_nested_field(NestedField::Transforms(TransformKey::Scale, 500.0));
    assert_eq!(insp.document().transforms.scale, 500.0);
    assert!(insp.generated_classes().contains("scale-[5.00]"));
}

#[test]
fn nested_edit_leaves_sibling_sides() {
    let mut insp = make_inspector();
    insp.set_nested_field(NestedField::Margin(Side::Bottom, "6".into()));
    let margin = &insp.document().margin;
    assert_eq!(margin.bottom, "6");
    assert_eq!(margin.top, "");
    assert_eq!(margin.left, "");
}
