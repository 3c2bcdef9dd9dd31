//! Persisted context the delegates mirror their values into.
//!
//! The store is read and written synchronously; flushing to durable storage
//! is left to the embedding application (see [`MemoryStore::to_json`]).

use crate::hap::value::Value;
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, PoisonError, RwLock},
};

pub trait ValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value);

    fn remove(&self, key: &str);

    fn keys(&self) -> Vec<String>;
}

/// In-memory context, cheap to clone (clones share the same map).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot as a JSON object, keys sorted.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        let sorted: BTreeMap<&String, &Value> = values.iter().collect();
        serde_json::to_string(&sorted)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let values: HashMap<String, Value> = serde_json::from_str(json)?;
        Ok(MemoryStore {
            values: Arc::new(RwLock::new(values)),
        })
    }
}

impl ValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_values() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("on", Value::Bool(true));
        assert_eq!(other.get("on"), Some(Value::Bool(true)));
        other.remove("on");
        assert_eq!(store.get("on"), None);
    }

    #[test]
    fn test_json_snapshot_restores() {
        let store = MemoryStore::new();
        store.set("brightness", Value::Int(40));
        store.set("name", Value::from("Desk"));
        let json = store.to_json().unwrap();
        assert_eq!(json, r#"{"brightness":40,"name":"Desk"}"#);

        let restored = MemoryStore::from_json(&json).unwrap();
        assert_eq!(restored.get("brightness"), Some(Value::Int(40)));
        let mut keys = restored.keys();
        keys.sort();
        assert_eq!(keys, vec!["brightness", "name"]);
    }
}
