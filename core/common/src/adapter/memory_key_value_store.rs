//! メモリ上の KeyValueStore 実装（テスト・一時利用向け）

use crate::error::Error;
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値入りで作る（壊れたデータの読み込みテストなど）
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut m) = store.entries.lock() {
            m.insert(key.to_string(), value.to_string());
        }
        store
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|m| m.contains_key(key))
            .unwrap_or(false)
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let m = self
            .entries
            .lock()
            .map_err(|_| Error::io_msg("memory store lock poisoned"))?;
        Ok(m.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut m = self
            .entries
            .lock()
            .map_err(|_| Error::io_msg("memory store lock poisoned"))?;
        m.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut m = self
            .entries
            .lock()
            .map_err(|_| Error::io_msg("memory store lock poisoned"))?;
        m.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let kv = MemoryKeyValueStore::new();
        assert_eq!(kv.get("a").unwrap(), None);
        kv.set("a", "1").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
        assert!(kv.contains_key("a"));
        kv.remove("a").unwrap();
        assert!(!kv.contains_key("a"));
    }

    #[test]
    fn test_with_entry_seeds_value() {
        let kv = MemoryKeyValueStore::with_entry("question_history", "not json");
        assert_eq!(kv.get("question_history").unwrap().as_deref(), Some("not json"));
    }
}
