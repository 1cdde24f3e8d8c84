use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::debug;

use crate::db::kv::KeyValueStore;
use crate::error::RecipeboxError;

use super::migrations;

/// Resolve the database location: explicit path (flag or `RECIPEBOX_DB`),
/// then the platform data dir, then `./.recipebox`.
pub fn db_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match dirs::data_dir() {
        Some(dir) => dir.join("recipebox").join("recipebox.db"),
        None => PathBuf::from(".recipebox").join("recipebox.db"),
    }
}

/// Open an existing database. Returns error if not initialized.
pub fn open_store(path: &Path) -> Result<SqliteStore, RecipeboxError> {
    if !path.exists() {
        return Err(RecipeboxError::not_initialized());
    }
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    Ok(SqliteStore { conn })
}

/// Create directories and database, then run migrations. Idempotent.
pub fn init_store(path: &Path) -> Result<SqliteStore, RecipeboxError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RecipeboxError::storage(e.to_string()))?;
    }
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(SqliteStore { conn })
}

fn configure_connection(conn: &Connection) -> Result<(), RecipeboxError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}

/// Key-value store backed by a single SQLite table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn in_memory() -> Result<Self, RecipeboxError> {
        let conn = Connection::open_in_memory()?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, RecipeboxError> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        debug!(key, hit = raw.is_some(), "kv get");
        match raw {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| RecipeboxError::storage(format!("Corrupt value at {key}: {e}"))),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), RecipeboxError> {
        let text = serde_json::to_string(value)?;
        // Upsert keeps the rowid, so `list` stays in first-write order.
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, text],
        )?;
        debug!(key, "kv set");
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, RecipeboxError> {
        // substr instead of LIKE: keys contain `_`, a LIKE wildcard.
        let mut stmt = self.conn.prepare(
            "SELECT key FROM kv WHERE substr(key, 1, length(?1)) = ?1 ORDER BY rowid ASC",
        )?;
        let keys = stmt
            .query_map(params![prefix], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    fn delete(&self, key: &str) -> Result<(), RecipeboxError> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        debug!(key, "kv delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn list_matches_prefix_literally() {
        let store = SqliteStore::in_memory().unwrap();
        store.set("meal_plan:2026-10-19", &json!({})).unwrap();
        store.set("mealXplan:2026-10-19", &json!({})).unwrap();
        store.set("meal_plan:2026-10-26", &json!({})).unwrap();
        assert_eq!(
            store.list("meal_plan:").unwrap(),
            vec!["meal_plan:2026-10-19", "meal_plan:2026-10-26"]
        );
    }

    #[test]
    fn upsert_keeps_first_write_order() {
        let store = SqliteStore::in_memory().unwrap();
        store.set("users:b", &json!(1)).unwrap();
        store.set("users:a", &json!(2)).unwrap();
        store.set("users:b", &json!(3)).unwrap();
        assert_eq!(store.list("users:").unwrap(), vec!["users:b", "users:a"]);
        assert_eq!(store.get("users:b").unwrap(), Some(json!(3)));
    }

    #[test]
    fn delete_removes_key() {
        let store = SqliteStore::in_memory().unwrap();
        store.set("photos:r1", &json!([])).unwrap();
        store.delete("photos:r1").unwrap();
        assert_eq!(store.get("photos:r1").unwrap(), None);
    }

    #[test]
    fn open_requires_init() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("recipebox.db");
        let err = open_store(&path).err().unwrap();
        assert_eq!(err.code, ErrorCode::NotInitialized);

        let store = init_store(&path).unwrap();
        store.set("current_user", &json!({"id": "user_1"})).unwrap();
        drop(store);

        let reopened = open_store(&path).unwrap();
        assert_eq!(reopened.get("current_user").unwrap(), Some(json!({"id": "user_1"})));
        // running migrations again is harmless
        init_store(&path).unwrap();
    }

    #[test]
    fn explicit_path_wins() {
        let p = PathBuf::from("/tmp/elsewhere.db");
        assert_eq!(db_path(Some(&p)), p);
    }
}
