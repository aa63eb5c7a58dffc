//! Explicit keyed session store.
//!
//! Hosts that serve multiple concurrent conversations need somewhere to
//! keep per-conversation state (a connected [`GatewayClient`], discovered
//! capabilities, whatever the host accumulates). That store is explicit:
//! the host owns a `SessionStore`, passes it by reference, and decides when
//! entries are created and evicted. Nothing here is process-global.
//!
//! [`GatewayClient`]: crate::client::GatewayClient

use std::collections::HashMap;
use tokio::sync::RwLock;

/// Keyed store for host-owned session state.
pub struct SessionStore<S> {
    entries: RwLock<HashMap<String, S>>,
}

impl<S> SessionStore<S> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert state under a key, returning the replaced state if any.
    pub async fn insert(&self, key: impl Into<String>, state: S) -> Option<S> {
        self.entries.write().await.insert(key.into(), state)
    }

    /// Remove and return the state under a key.
    pub async fn evict(&self, key: &str) -> Option<S> {
        self.entries.write().await.remove(key)
    }

    /// Whether a key is present.
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Snapshot of the stored keys.
    pub async fn keys(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl<S: Clone> SessionStore<S> {
    /// Clone the state under a key.
    pub async fn get(&self, key: &str) -> Option<S> {
        self.entries.read().await.get(key).cloned()
    }

    /// Return the state under a key, creating it with `init` when absent.
    pub async fn get_or_insert_with(&self, key: &str, init: impl FnOnce() -> S) -> S {
        let mut entries = self.entries.write().await;
        entries.entry(key.to_string()).or_insert_with(init).clone()
    }
}

impl<S> Default for SessionStore<S> {
    fn default() -> Self {
        Self::new()
    }
}
