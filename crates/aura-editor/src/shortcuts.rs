//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser bridge and native hosts agree on the bindings.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
}

/// Resolves key events into shortcut actions.
///
/// `mod` is platform-neutral: either `ctrl` or `meta` (⌘) counts.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Y"`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, ctrl: bool, shift: bool, meta: bool) -> Option<ShortcutAction> {
        Self::lookup(&Self::normalize(key, ctrl, shift, meta))
    }

    /// Canonical `mod+shift+key` form of a key event. Modifiers appear in
    /// that order; the key is lowercased.
    pub fn normalize(key: &str, ctrl: bool, shift: bool, meta: bool) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if ctrl || meta {
            parts.push("mod".into());
        }
        if shift {
            parts.push("shift".into());
        }
        parts.push(key.to_lowercase());
        parts.join("+")
    }

    /// Look up an already-normalized combo.
    pub fn lookup(combo: &str) -> Option<ShortcutAction> {
        match combo {
            "mod+z" => Some(ShortcutAction::Undo),
            "mod+shift+z" | "mod+y" => Some(ShortcutAction::Redo),
            _ => None,
        }
    }
}
