//! Draft persistence.
//!
//! Every draft mutation is mirrored to durable storage under one fixed key
//! and restored on the next mount, so a reload never loses progress. The
//! envelope is versioned the same way as any other save format here:
//! `SAVE_VERSION` is the current shape, `MIN_COMPATIBLE_VERSION` the oldest
//! one we still accept; anything older is discarded rather than migrated.
//!
//! Persistence is best-effort. Failures are logged to the console and the
//! in-memory draft stays authoritative for the session.

use serde::{Deserialize, Serialize};

use super::state::ResumeDraft;

const SAVE_VERSION: u32 = 1;
const MIN_COMPATIBLE_VERSION: u32 = 1;

/// The localStorage key the draft lives under.
pub const DRAFT_KEY: &str = "resumio_draft";

/// Minimal string-keyed durable storage surface.
///
/// The wasm implementation wraps `window.localStorage`; tests use an
/// in-memory store so persistence behavior runs on the native target.
pub trait DraftStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    draft: ResumeDraft,
}

fn encode(draft: &ResumeDraft) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SaveData {
        version: SAVE_VERSION,
        draft: draft.clone(),
    })
}

fn decode(json: &str) -> Option<ResumeDraft> {
    let data: SaveData = serde_json::from_str(json).ok()?;
    if data.version < MIN_COMPATIBLE_VERSION {
        return None;
    }
    Some(data.draft)
}

/// Overwrite the stored draft. No history, no versioned copies.
pub fn persist<S: DraftStore>(store: &S, draft: &ResumeDraft) {
    match encode(draft) {
        Ok(json) => store.set(DRAFT_KEY, &json),
        Err(e) => warn(&format!("resumio: failed to serialize draft: {e}")),
    }
}

/// Load the stored draft, if any. Unreadable or incompatible data is
/// removed and treated as absent.
pub fn restore<S: DraftStore>(store: &S) -> Option<ResumeDraft> {
    let json = store.get(DRAFT_KEY)?;
    match decode(&json) {
        Some(draft) => Some(draft),
        None => {
            warn("resumio: discarding unreadable or outdated draft");
            store.remove(DRAFT_KEY);
            None
        }
    }
}

/// Drop the stored draft (called once submission succeeds).
pub fn clear<S: DraftStore>(store: &S) {
    store.remove(DRAFT_KEY);
}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(message: &str) {
    eprintln!("{message}");
}

/// `window.localStorage`-backed store.
#[cfg(target_arch = "wasm32")]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl DraftStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.set_item(key, value) {
                warn(&format!("resumio: localStorage write failed: {e:?}"));
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store for tests.
#[cfg(any(test, not(target_arch = "wasm32")))]
pub struct MemoryStore {
    items: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(any(test, not(target_arch = "wasm32")))]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            items: std::cell::RefCell::new(std::collections::HashMap::new()),
        }
    }
}

#[cfg(any(test, not(target_arch = "wasm32")))]
impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, not(target_arch = "wasm32")))]
impl DraftStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}
