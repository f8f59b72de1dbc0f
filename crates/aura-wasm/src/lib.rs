//! WASM bridge for Aura — exposes the inspector engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The panel holds one
//! `AuraInspector`, forwards edits as `(key, nestedKey, json)` triples, and
//! drives the persistence timer with `tick(Date.now())`.

mod storage;

use aura_core::{PartialDocument, PropertyGroups};
use aura_editor::{Inspector, Mutation, Persistence, ShortcutMap};
use wasm_bindgen::prelude::*;

pub use storage::{BrowserStore, JsClock};

/// The inspector session seen from JavaScript.
#[wasm_bindgen]
pub struct AuraInspector {
    inner: Inspector<BrowserStore, JsClock>,
}

impl Default for AuraInspector {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl AuraInspector {
    /// Open a session, restoring any state saved in localStorage.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            inner: Inspector::new(Persistence::new(BrowserStore::open()), JsClock),
        }
    }

    /// The live document as JSON.
    pub fn state_json(&self) -> String {
        self.inner.document().to_json().unwrap_or_else(|e| {
            log::error!("failed to encode document: {e}");
            "{}".to_string()
        })
    }

    /// Replace a top-level property. `json` is the new value as JSON text.
    /// Returns `false` (and changes nothing) for unknown keys or bad values.
    pub fn set_field(&mut self, key: &str, json: &str) -> bool {
        self.apply_keyed(key, None, json)
    }

    /// Replace one entry of a nested property, e.g. `("padding", "top", "\"4\"")`.
    pub fn set_nested_field(&mut self, key: &str, nested_key: &str, json: &str) -> bool {
        self.apply_keyed(key, Some(nested_key), json)
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    pub fn history_len(&self) -> u32 {
        self.inner.history_len() as u32
    }

    pub fn generated_classes(&self) -> String {
        self.inner.generated_classes()
    }

    pub fn generated_code(&self) -> String {
        self.inner.generated_markup()
    }

    /// Apply a generated design (JSON object). Returns the number of
    /// edits made; malformed input applies nothing.
    pub fn apply_design(&mut self, json: &str) -> u32 {
        match PartialDocument::from_json(json) {
            Ok(design) => self.inner.apply_design(&design) as u32,
            Err(e) => {
                log::warn!("ignoring malformed design: {e}");
                0
            }
        }
    }

    /// Commit the pending save if it is due at `now_ms` (JS `Date.now()`).
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.inner.tick_at(now_ms.max(0.0) as u64)
    }

    /// Commit any pending save now. Call on `pagehide`.
    pub fn flush(&mut self) -> bool {
        self.inner.flush()
    }

    /// Handle a keyboard shortcut. Returns `true` if the document changed.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, meta: bool) -> bool {
        match ShortcutMap::resolve(key, ctrl, shift, meta) {
            Some(action) => self.inner.handle_shortcut(action),
            None => false,
        }
    }

    /// Whether state is going to localStorage rather than memory.
    pub fn is_durable(&self) -> bool {
        self.inner.persistence().store().is_durable()
    }
}

impl AuraInspector {
    fn apply_keyed(&mut self, key: &str, nested_key: Option<&str>, json: &str) -> bool {
        let value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("ignoring edit of `{key}`: {e}");
                return false;
            }
        };
        match Mutation::from_json(key, nested_key, value) {
            Ok(mutation) => {
                self.inner.apply(mutation);
                true
            }
            Err(e) => {
                log::warn!("ignoring edit: {e}");
                false
            }
        }
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Aura WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone catalogue functions ──────────────────────────────────────

/// Property groups in display order, as a JSON array.
#[wasm_bindgen]
pub fn property_groups() -> String {
    serde_json::to_string(PropertyGroups::in_order()).unwrap_or_else(|_| "[]".to_string())
}

/// Ids of the groups expanded when the panel opens, as a JSON array.
#[wasm_bindgen]
pub fn default_expanded_groups() -> String {
    serde_json::to_string(PropertyGroups::default_expanded()).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn state(insp: &AuraInspector) -> Value {
        serde_json::from_str(&insp.state_json()).unwrap()
    }

    #[test]
    fn opens_with_defaults_in_memory() {
        let insp = AuraInspector::new();
        assert!(!insp.is_durable());
        assert_eq!(state(&insp)["elementTag"], "h2");
        assert!(!insp.can_undo());
    }

    #[test]
    fn keyed_edits() {
        let mut insp = AuraInspector::new();
        assert!(insp.set_nested_field("padding", "top", "\"4\""));
        assert!(insp.set_field("elementTag", "\"section\""));
        assert_eq!(state(&insp)["padding"]["top"], "4");
        assert_eq!(state(&insp)["padding"]["bottom"], "3");
        assert_eq!(insp.history_len(), 2);

        assert!(!insp.set_field("shadow", "\"lg\""));
        assert!(!insp.set_field("opacity", "not json"));
        assert!(!insp.set_nested_field("padding", "inline", "\"4\""));
        assert_eq!(insp.history_len(), 2);
    }

    #[test]
    fn shortcuts_undo_and_redo() {
        let mut insp = AuraInspector::new();
        insp.set_field("blur", "6");
        assert!(insp.handle_key("z", true, false, false));
        assert_eq!(state(&insp)["blur"], 0.0);
        assert!(insp.handle_key("z", false, true, true));
        assert_eq!(state(&insp)["blur"], 6.0);
        assert!(!insp.handle_key("q", true, false, false));
    }

    #[test]
    fn apply_design_counts_edits() {
        let mut insp = AuraInspector::new();
        assert_eq!(
            insp.apply_design(r#"{"elementTag":"button","textContent":"Buy","blur":2}"#),
            3
        );
        assert_eq!(insp.apply_design("[oops"), 0);
        assert!(insp.generated_code().starts_with("<button"));
    }

    #[test]
    fn generated_classes_follow_edits() {
        let mut insp = AuraInspector::new();
        insp.set_field("breakpoint", "\"md\"");
        assert!(insp.generated_classes().starts_with("md:pr-2"));
    }

    #[test]
    fn tick_commits_after_debounce() {
        let mut insp = AuraInspector::new();
        insp.set_field("link", "\"https://example.com\"");
        assert!(!insp.tick(0.0));
        assert!(insp.tick(f64::MAX));
        assert!(!insp.flush());
    }

    #[test]
    fn catalogue_json() {
        let groups: Value = serde_json::from_str(&property_groups()).unwrap();
        assert_eq!(groups.as_array().map(Vec::len), Some(8));
        assert_eq!(groups[0]["id"], "content");
        assert_eq!(
            default_expanded_groups(),
            r#"["content","sizing","spacing"]"#
        );
    }
}
