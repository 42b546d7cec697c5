//! Per-target-root lock registry
//!
//! Two passes against the same target root could both observe "folder or
//! document missing" and both create it; serializing passes per canonical
//! target-root path eliminates the race without transactional support from
//! the store. Passes against different target roots run fully in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Registry of per-target-root mutexes
///
/// Lock handles are created and looked up under a short-lived global lock;
/// the returned handle is then held for the entire pass. Keys are canonical
/// root paths, so equal paths always map to the same handle regardless of
/// how the caller spelled them.
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the lock handle for a canonical target-root path
    pub fn lock_for(&self, target_root_path: &str) -> Arc<Mutex<()>> {
        // A poisoned registry only means some pass panicked while holding
        // the map lock; the map itself stays usable.
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(target_root_path.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
