use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::RecipeboxError;

/// Opaque key-value store over JSON values. Every repository takes one of
/// these rather than a concrete backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, RecipeboxError>;
    fn set(&self, key: &str, value: &Value) -> Result<(), RecipeboxError>;
    /// Keys starting with `prefix`, in first-write order where the backend
    /// tracks it.
    fn list(&self, prefix: &str) -> Result<Vec<String>, RecipeboxError>;
    fn delete(&self, key: &str) -> Result<(), RecipeboxError>;
}

/// Typed read. A stored value that no longer deserializes into `T` is
/// logged and treated as absent.
pub fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, RecipeboxError> {
    let Some(value) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!(key, error = %e, "ignoring undecodable stored value");
            Ok(None)
        }
    }
}

pub fn load_or<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    default: T,
) -> Result<T, RecipeboxError> {
    Ok(load(store, key)?.unwrap_or(default))
}

pub fn save<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), RecipeboxError> {
    let value = serde_json::to_value(value)?;
    store.set(key, &value)
}

pub mod keys {
    pub const RECIPE_INDEX: &str = "recipe_index";
    pub const CURRENT_USER: &str = "current_user";
    pub const USER_PREFIX: &str = "users:";

    pub fn recipe(id: &str) -> String {
        format!("recipes:{id}")
    }

    pub fn ratings(recipe_id: &str) -> String {
        format!("ratings:{recipe_id}")
    }

    pub fn comments(recipe_id: &str) -> String {
        format!("comments:{recipe_id}")
    }

    pub fn photos(recipe_id: &str) -> String {
        format!("photos:{recipe_id}")
    }

    pub fn meal_plan(week_key: &str) -> String {
        format!("meal_plan:{week_key}")
    }

    pub fn shopping_list(week_key: &str) -> String {
        format!("shopping_list:{week_key}")
    }

    pub fn user(id: &str) -> String {
        format!("{USER_PREFIX}{id}")
    }
}
