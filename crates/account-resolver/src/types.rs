//! Core types shared by the resolution pipeline

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

/// Raw input: `"<tag>:<username>"` or `"<tag>:<username>:<id>"` → payload
pub type InputMap<V> = HashMap<String, V>;

/// Output: canonical `"<providerCode>:<id>"` → payload
pub type ResultMap<V> = HashMap<String, V>;

/// A username still waiting to be resolved, with the payload it carries
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<V> {
    pub username: String,
    pub payload: V,
}

/// Append-only result accumulator shared by concurrently pending chunk handlers.
///
/// Locks are taken per insert and never held across an `.await`.
#[derive(Debug)]
pub struct ResultSink<V> {
    entries: Mutex<ResultMap<V>>,
}

impl<V> ResultSink<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record a canonical key. Returns `false` (keeping the existing payload)
    /// if the key was already present.
    pub fn insert(&self, key: String, payload: V) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.contains_key(&key) {
            debug!(key = %key, "Canonical key already resolved, keeping first payload");
            return false;
        }
        entries.insert(key, payload);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(key)
    }

    pub fn into_inner(self) -> ResultMap<V> {
        self.entries.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<V> Default for ResultSink<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_is_append_only() {
        let sink = ResultSink::new();
        assert!(sink.insert("1002:1".to_string(), "first"));
        assert!(!sink.insert("1002:1".to_string(), "second"));
        assert!(sink.insert("1002:2".to_string(), "other"));

        let map = sink.into_inner();
        assert_eq!(map.len(), 2);
        assert_eq!(map["1002:1"], "first");
    }

    #[test]
    fn test_sink_lookup_helpers() {
        let sink = ResultSink::new();
        assert!(sink.is_empty());
        sink.insert("1002:1".to_string(), 1);
        sink.insert("1002:2".to_string(), 2);

        assert_eq!(sink.len(), 2);
        assert!(sink.contains_key("1002:2"));
        assert!(!sink.is_empty());
    }
}
