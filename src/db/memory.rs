use std::cell::{Cell, RefCell};

use serde_json::Value;

use crate::db::kv::KeyValueStore;
use crate::error::RecipeboxError;

/// In-memory store. Keeps insertion order so `list` behaves like the
/// SQLite store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<Vec<(String, Value)>>,
    read_only: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While read-only, `set` and `delete` fail with a storage error.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_writable(&self, key: &str) -> Result<(), RecipeboxError> {
        if self.read_only.get() {
            return Err(RecipeboxError::storage(format!(
                "Failed to save data: store is read-only ({key})"
            )));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, RecipeboxError> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), RecipeboxError> {
        self.check_writable(key)?;
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.clone(),
            None => entries.push((key.to_owned(), value.clone())),
        }
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, RecipeboxError> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }

    fn delete(&self, key: &str) -> Result<(), RecipeboxError> {
        self.check_writable(key)?;
        self.entries.borrow_mut().retain(|(k, _)| k != key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn set_overwrites_in_place() {
        let store = MemoryStore::new();
        store.set("users:a", &json!(1)).unwrap();
        store.set("users:b", &json!(2)).unwrap();
        store.set("users:a", &json!(3)).unwrap();
        assert_eq!(store.list("users:").unwrap(), vec!["users:a", "users:b"]);
        assert_eq!(store.get("users:a").unwrap(), Some(json!(3)));
    }

    #[test]
    fn delete_missing_key_is_fine() {
        let store = MemoryStore::new();
        store.delete("nope").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn read_only_rejects_writes_but_allows_reads() {
        let store = MemoryStore::new();
        store.set("k", &json!("v")).unwrap();
        store.set_read_only(true);
        let err = store.set("k", &json!("w")).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(store.delete("k").is_err());
        assert_eq!(store.get("k").unwrap(), Some(json!("v")));
    }
}
