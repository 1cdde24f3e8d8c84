use crate::db::kv::{keys, load, save, KeyValueStore};
use crate::error::RecipeboxError;
use crate::models::ShoppingList;

pub fn get_shopping_list(
    store: &dyn KeyValueStore,
    week_key: &str,
) -> Result<Option<ShoppingList>, RecipeboxError> {
    load(store, &keys::shopping_list(week_key))
}

pub fn save_shopping_list(
    store: &dyn KeyValueStore,
    week_key: &str,
    list: &ShoppingList,
) -> Result<(), RecipeboxError> {
    save(store, &keys::shopping_list(week_key), list)
}
