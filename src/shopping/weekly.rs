//! The persisted shopping list for one planned week.
//!
//! Each call performs one load, at most one change and one save. Nothing is
//! locked; two writers working from the same snapshot overwrite each other.

use chrono::NaiveDate;
use tracing::info;

use crate::db::kv::KeyValueStore;
use crate::db::{meal_plan_repo, recipe_repo, shopping_repo};
use crate::error::RecipeboxError;
use crate::ids::IdGenerator;
use crate::models::meal_plan::date_key;
use crate::models::{Category, ShoppingList};
use crate::shopping::{generator, mutator};

fn generate_for_week(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    week_start: NaiveDate,
) -> Result<ShoppingList, RecipeboxError> {
    let recipe_ids = meal_plan_repo::week_recipe_ids(store, week_start)?;
    generator::generate_shopping_list(
        &recipe_ids,
        |id| recipe_repo::get_recipe(store, id),
        ids,
    )
}

/// The saved list; else a list generated from the week's plan (and saved);
/// else an unsaved empty list when nothing is planned.
pub fn load_or_generate(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    week_start: NaiveDate,
) -> Result<ShoppingList, RecipeboxError> {
    let week_key = date_key(week_start);
    if let Some(list) = shopping_repo::get_shopping_list(store, &week_key)? {
        return Ok(list);
    }
    if meal_plan_repo::week_recipe_ids(store, week_start)?.is_empty() {
        return Ok(ShoppingList::empty());
    }
    let list = generate_for_week(store, ids, week_start)?;
    shopping_repo::save_shopping_list(store, &week_key, &list)?;
    info!(week = %week_key, items = list.total_items(), "generated shopping list");
    Ok(list)
}

/// Rebuild from the plan, discarding checks and custom items.
pub fn regenerate(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    week_start: NaiveDate,
) -> Result<ShoppingList, RecipeboxError> {
    let week_key = date_key(week_start);
    let list = generate_for_week(store, ids, week_start)?;
    shopping_repo::save_shopping_list(store, &week_key, &list)?;
    info!(week = %week_key, items = list.total_items(), "regenerated shopping list");
    Ok(list)
}

fn update<F>(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    week_start: NaiveDate,
    change: F,
) -> Result<ShoppingList, RecipeboxError>
where
    F: FnOnce(&ShoppingList) -> ShoppingList,
{
    let current = load_or_generate(store, ids, week_start)?;
    let updated = change(&current);
    shopping_repo::save_shopping_list(store, &date_key(week_start), &updated)?;
    Ok(updated)
}

pub fn toggle_item(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    week_start: NaiveDate,
    item_id: &str,
) -> Result<ShoppingList, RecipeboxError> {
    update(store, ids, week_start, |list| mutator::toggle_checked(list, item_id))
}

pub fn add_item(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    week_start: NaiveDate,
    text: &str,
    category: Category,
) -> Result<ShoppingList, RecipeboxError> {
    if text.trim().is_empty() {
        return Err(RecipeboxError::validation("Item text must not be empty"));
    }
    update(store, ids, week_start, |list| {
        mutator::add_custom_item(list, text, category, ids)
    })
}

pub fn remove_item(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    week_start: NaiveDate,
    item_id: &str,
) -> Result<ShoppingList, RecipeboxError> {
    update(store, ids, week_start, |list| mutator::remove_item(list, item_id))
}

pub fn clear_checked(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    week_start: NaiveDate,
) -> Result<ShoppingList, RecipeboxError> {
    update(store, ids, week_start, mutator::clear_checked_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::error::ErrorCode;
    use crate::ids::SequentialIds;
    use crate::models::{MealSlot, NewRecipe, User};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn setup() -> (MemoryStore, SequentialIds) {
        let store = MemoryStore::new();
        let ids = SequentialIds::new();
        let mom = User {
            id: "user_mom".into(),
            name: "Mom".into(),
            color: "#FF6B6B".into(),
            created: "2026-10-19T00:00:00Z".into(),
        };
        let salad = NewRecipe {
            name: "Salad".into(),
            servings: 2,
            ingredients: vec!["1 cucumber, sliced".into(), "2 tbsp balsamic vinegar".into()],
            ..NewRecipe::default()
        };
        let recipe = recipe_repo::create_recipe(&store, &ids, salad, &mom).unwrap();
        meal_plan_repo::assign(&store, monday(), MealSlot::Lunch, Some(recipe.id.as_str())).unwrap();
        (store, ids)
    }

    #[test]
    fn empty_week_gives_unsaved_empty_list() {
        let store = MemoryStore::new();
        let list = load_or_generate(&store, &SequentialIds::new(), monday()).unwrap();
        assert_eq!(list, ShoppingList::empty());
        assert!(store.get("shopping_list:2026-10-19").unwrap().is_none());
    }

    #[test]
    fn planned_week_generates_and_saves_once() {
        let (store, ids) = setup();
        let first = load_or_generate(&store, &ids, monday()).unwrap();
        assert_eq!(first.total_items(), 2);
        assert!(store.get("shopping_list:2026-10-19").unwrap().is_some());

        // second load returns the saved snapshot, not a fresh one
        let again = load_or_generate(&store, &ids, monday()).unwrap();
        assert_eq!(again, first);
    }

    #[test]
    fn mutations_persist_snapshots() {
        let (store, ids) = setup();
        let list = load_or_generate(&store, &ids, monday()).unwrap();
        let cucumber = list.items(Category::Produce)[0].id.clone();

        toggle_item(&store, &ids, monday(), &cucumber).unwrap();
        add_item(&store, &ids, monday(), "dish soap", Category::Other).unwrap();
        let saved = shopping_repo::get_shopping_list(&store, "2026-10-19").unwrap().unwrap();
        assert!(saved.find(&cucumber).unwrap().checked);
        assert_eq!(saved.items(Category::Other)[0].item, "dish soap");

        let cleared = clear_checked(&store, &ids, monday()).unwrap();
        assert!(cleared.find(&cucumber).is_none());
        let custom = cleared.items(Category::Other)[0].id.clone();
        let removed = remove_item(&store, &ids, monday(), &custom).unwrap();
        assert_eq!(removed.total_items(), 1);
    }

    #[test]
    fn regenerate_discards_edits() {
        let (store, ids) = setup();
        add_item(&store, &ids, monday(), "dish soap", Category::Other).unwrap();
        let fresh = regenerate(&store, &ids, monday()).unwrap();
        assert!(fresh.items(Category::Other).is_empty());
        assert_eq!(fresh.total_items(), 2);
        assert_eq!(fresh.checked_items(), 0);
    }

    #[test]
    fn deleted_recipe_is_skipped_on_regenerate() {
        let (store, ids) = setup();
        recipe_repo::delete_recipe(&store, "recipe_1").unwrap();
        let fresh = regenerate(&store, &ids, monday()).unwrap();
        assert_eq!(fresh.total_items(), 0);
        assert_eq!(fresh.categories().count(), 7);
    }

    #[test]
    fn blank_custom_item_is_rejected() {
        let (store, ids) = setup();
        let err = add_item(&store, &ids, monday(), "  ", Category::Other).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn storage_failure_surfaces_from_mutation() {
        let (store, ids) = setup();
        load_or_generate(&store, &ids, monday()).unwrap();
        store.set_read_only(true);
        let err = clear_checked(&store, &ids, monday()).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
