use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

/// Process-wide cache of raw page payloads keyed by `path?query`.
///
/// Handles are cheap clones over shared storage, so independent query
/// managers viewing the same resource see each other's entries. Payloads are
/// kept as raw JSON; typed deserialization happens at the manager, which
/// lets one cache serve managers of different resource types.
#[derive(Clone, Default)]
pub struct PageCache {
    inner: Arc<RwLock<HashMap<String, Value>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache key for a resolved request.
    pub fn key(path: &str, query: &str) -> String {
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().unwrap().get(key).cloned()
    }

    pub fn put(&self, key: String, payload: Value) {
        self.inner.write().unwrap().insert(key, payload);
    }

    pub fn invalidate(&self, key: &str) {
        self.inner.write().unwrap().remove(key);
    }

    pub fn clear(&self) {
        self.inner.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }
}
