//! Editing engine for the Aura inspector.
//!
//! - [`mutation`]: typed edits and the string-keyed bridge decoder
//! - [`history`]: bounded undo/redo snapshot stacks
//! - [`persist`]: debounced storage of the live document
//! - [`inspector`]: the session container tying them together
//! - [`shortcuts`]: keyboard bindings for undo/redo

pub mod history;
pub mod inspector;
pub mod mutation;
pub mod persist;
pub mod shortcuts;

pub use history::{History, MAX_HISTORY};
pub use inspector::Inspector;
pub use mutation::{Field, Mutation, MutationError, NestedField};
pub use persist::{
    Clock, FileStore, ManualClock, MemoryStore, Millis, PersistConfig, Persistence, Store,
    StoreError, SystemClock,
};
pub use shortcuts::{ShortcutAction, ShortcutMap};
