use chrono::Utc;
use tracing::info;

use crate::db::kv::{keys, load, save, KeyValueStore};
use crate::error::RecipeboxError;
use crate::ids::IdGenerator;
use crate::models::{User, USER_COLORS};

pub fn list_users(store: &dyn KeyValueStore) -> Result<Vec<User>, RecipeboxError> {
    let mut users = Vec::new();
    for key in store.list(keys::USER_PREFIX)? {
        if let Some(user) = load(store, &key)? {
            users.push(user);
        }
    }
    Ok(users)
}

/// New profile; colours cycle through the palette by profile count.
pub fn create_user(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    name: &str,
) -> Result<User, RecipeboxError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RecipeboxError::validation("User name must not be empty"));
    }
    let existing = list_users(store)?.len();
    let user = User {
        id: ids.next_id("user"),
        name: name.to_owned(),
        color: USER_COLORS[existing % USER_COLORS.len()].to_owned(),
        created: Utc::now().to_rfc3339(),
    };
    save(store, &keys::user(&user.id), &user)?;
    info!(user_id = %user.id, name = %user.name, "created user");
    Ok(user)
}

pub fn get_user(store: &dyn KeyValueStore, id: &str) -> Result<Option<User>, RecipeboxError> {
    load(store, &keys::user(id))
}

pub fn current_user(store: &dyn KeyValueStore) -> Result<Option<User>, RecipeboxError> {
    load(store, keys::CURRENT_USER)
}

pub fn set_current_user(store: &dyn KeyValueStore, user: &User) -> Result<(), RecipeboxError> {
    save(store, keys::CURRENT_USER, user)
}

/// The stored current user, or else the first profile (which then becomes
/// current), or none when no profiles exist.
pub fn resolve_current_user(store: &dyn KeyValueStore) -> Result<Option<User>, RecipeboxError> {
    if let Some(user) = current_user(store)? {
        return Ok(Some(user));
    }
    match list_users(store)?.into_iter().next() {
        Some(first) => {
            set_current_user(store, &first)?;
            Ok(Some(first))
        }
        None => Ok(None),
    }
}

pub fn require_current_user(store: &dyn KeyValueStore) -> Result<User, RecipeboxError> {
    resolve_current_user(store)?.ok_or_else(RecipeboxError::no_current_user)
}
