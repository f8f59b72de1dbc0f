//! Debounced persistence of the live document.
//!
//! The document is written under a single key after a quiet period. Every
//! change replaces the pending write and pushes its deadline out; hosts
//! drive the timer by calling [`Persistence::tick`] from their own loop.
//! Store failures are logged and swallowed: the in-memory document stays
//! authoritative.

use aura_core::Document;
use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Milliseconds on a host-defined monotonic clock.
pub type Millis = u64;

/// Storage key of the persisted document.
pub const STORAGE_KEY: &str = "inspector-state";

/// Quiet period before a scheduled write commits.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// ─── Stores ──────────────────────────────────────────────────────────────

/// A string key-value store.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, used by tests and headless sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `{key}.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Write beside the target, then rename over it.
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, self.path(key))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

// ─── Clocks ──────────────────────────────────────────────────────────────

/// Source of "now" for the debounce timer.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Milliseconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Millis) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

// ─── Persistence ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistConfig {
    pub key: String,
    pub debounce: Duration,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            key: STORAGE_KEY.to_string(),
            debounce: DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone)]
struct PendingWrite {
    payload: String,
    deadline: Millis,
}

/// Debounced writer for one document key.
#[derive(Debug)]
pub struct Persistence<S: Store> {
    store: S,
    config: PersistConfig,
    pending: Option<PendingWrite>,
}

impl<S: Store> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, PersistConfig::default())
    }

    pub fn with_config(store: S, config: PersistConfig) -> Self {
        Self {
            store,
            config,
            pending: None,
        }
    }

    pub fn config(&self) -> &PersistConfig {
        &self.config
    }

    /// Restore the stored document. Missing or unreadable state yields the
    /// defaults.
    pub fn load(&self) -> Document {
        match self.store.get(&self.config.key) {
            Ok(Some(json)) => Document::merge_stored(&json),
            Ok(None) => Document::default(),
            Err(e) => {
                log::error!("failed to load inspector state: {e}");
                Document::default()
            }
        }
    }

    /// Replace any pending write with `doc`, due one debounce period
    /// after `now`.
    pub fn schedule(&mut self, doc: &Document, now: Millis) {
        let payload = match doc.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("failed to save inspector state: {}", StoreError::from(e));
                return;
            }
        };
        let deadline = now.saturating_add(self.config.debounce.as_millis() as Millis);
        self.pending = Some(PendingWrite { payload, deadline });
    }

    /// Commit the pending write if its deadline has passed. Returns `true`
    /// when a write was attempted.
    pub fn tick(&mut self, now: Millis) -> bool {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        due && self.flush()
    }

    /// Commit any pending write immediately.
    pub fn flush(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if let Err(e) = self.store.set(&self.config.key, &pending.payload) {
            log::error!("failed to save inspector state: {e}");
        }
        true
    }

    /// Delete the stored document and drop any pending write.
    pub fn clear(&mut self) {
        self.pending = None;
        if let Err(e) = self.store.remove(&self.config.key) {
            log::error!("failed to clear inspector state: {e}");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
