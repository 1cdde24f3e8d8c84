use chrono::Utc;
use tracing::info;

use crate::db::kv::{keys, load, load_or, save, KeyValueStore};
use crate::error::RecipeboxError;
use crate::ids::IdGenerator;
use crate::models::{NewRecipe, Recipe, RecipeUpdate, User};

fn validate(name: &str, servings: u32) -> Result<(), RecipeboxError> {
    if name.trim().is_empty() {
        return Err(RecipeboxError::validation("Recipe name must not be empty"));
    }
    if servings < 1 {
        return Err(RecipeboxError::validation("Servings must be at least 1"));
    }
    Ok(())
}

pub fn create_recipe(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    new: NewRecipe,
    author: &User,
) -> Result<Recipe, RecipeboxError> {
    validate(&new.name, new.servings)?;

    let recipe = Recipe {
        id: ids.next_id("recipe"),
        name: new.name.trim().to_owned(),
        photo_url: new.photo_url,
        prep_time: new.prep_time,
        cook_time: new.cook_time,
        servings: new.servings,
        categories: new.categories,
        ingredients: new.ingredients,
        instructions: new.instructions,
        author_id: author.id.clone(),
        author_name: author.name.clone(),
        date_added: Utc::now().to_rfc3339(),
        last_made: None,
    };
    save(store, &keys::recipe(&recipe.id), &recipe)?;

    let mut index = recipe_index(store)?;
    index.push(recipe.id.clone());
    save(store, keys::RECIPE_INDEX, &index)?;

    info!(recipe_id = %recipe.id, name = %recipe.name, "created recipe");
    Ok(recipe)
}

pub fn get_recipe(store: &dyn KeyValueStore, id: &str) -> Result<Option<Recipe>, RecipeboxError> {
    load(store, &keys::recipe(id))
}

pub fn require_recipe(store: &dyn KeyValueStore, id: &str) -> Result<Recipe, RecipeboxError> {
    get_recipe(store, id)?.ok_or_else(|| RecipeboxError::recipe_not_found(id))
}

pub fn recipe_index(store: &dyn KeyValueStore) -> Result<Vec<String>, RecipeboxError> {
    load_or(store, keys::RECIPE_INDEX, Vec::new())
}

/// All recipes in index order. Index entries without a record are skipped.
pub fn list_recipes(store: &dyn KeyValueStore) -> Result<Vec<Recipe>, RecipeboxError> {
    let mut recipes = Vec::new();
    for id in recipe_index(store)? {
        if let Some(recipe) = get_recipe(store, &id)? {
            recipes.push(recipe);
        }
    }
    Ok(recipes)
}

pub fn update_recipe(
    store: &dyn KeyValueStore,
    id: &str,
    update: RecipeUpdate,
) -> Result<Recipe, RecipeboxError> {
    let mut recipe = require_recipe(store, id)?;
    update.apply(&mut recipe);
    recipe.id = id.to_owned();
    validate(&recipe.name, recipe.servings)?;
    save(store, &keys::recipe(id), &recipe)?;
    info!(recipe_id = %id, "updated recipe");
    Ok(recipe)
}

pub fn mark_made(store: &dyn KeyValueStore, id: &str) -> Result<Recipe, RecipeboxError> {
    let mut recipe = require_recipe(store, id)?;
    recipe.last_made = Some(Utc::now().to_rfc3339());
    save(store, &keys::recipe(id), &recipe)?;
    Ok(recipe)
}

/// Removes the recipe with its ratings, comments and photos. Meal plans
/// that reference it are left alone; lookups skip the dangling id.
pub fn delete_recipe(store: &dyn KeyValueStore, id: &str) -> Result<(), RecipeboxError> {
    store.delete(&keys::recipe(id))?;
    store.delete(&keys::ratings(id))?;
    store.delete(&keys::comments(id))?;
    store.delete(&keys::photos(id))?;

    let index: Vec<String> = recipe_index(store)?
        .into_iter()
        .filter(|existing| existing != id)
        .collect();
    save(store, keys::RECIPE_INDEX, &index)?;
    info!(recipe_id = %id, "deleted recipe");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::error::ErrorCode;
    use crate::ids::SequentialIds;

    fn author() -> User {
        User {
            id: "user_mom".into(),
            name: "Mom".into(),
            color: "#FF6B6B".into(),
            created: "2026-10-19T00:00:00Z".into(),
        }
    }

    fn pancakes() -> NewRecipe {
        NewRecipe {
            name: "Fluffy Pancakes".into(),
            prep_time: 5,
            cook_time: 15,
            servings: 4,
            categories: vec!["Breakfast".into()],
            ingredients: vec!["2 cups all-purpose flour".into(), "2 large eggs".into()],
            instructions: vec!["Mix".into(), "Cook".into()],
            ..NewRecipe::default()
        }
    }

    #[test]
    fn create_assigns_id_author_and_indexes() {
        let store = MemoryStore::new();
        let ids = SequentialIds::new();
        let recipe = create_recipe(&store, &ids, pancakes(), &author()).unwrap();

        assert_eq!(recipe.id, "recipe_1");
        assert_eq!(recipe.author_id, "user_mom");
        assert_eq!(recipe.author_name, "Mom");
        assert!(recipe.last_made.is_none());
        assert_eq!(recipe_index(&store).unwrap(), vec!["recipe_1"]);

        let stored = store.get("recipes:recipe_1").unwrap().unwrap();
        assert_eq!(stored["prepTime"], 5);
        assert_eq!(stored["authorName"], "Mom");
        assert!(stored["lastMade"].is_null());
    }

    #[test]
    fn create_rejects_blank_name() {
        let store = MemoryStore::new();
        let new = NewRecipe {
            name: "  ".into(),
            servings: 1,
            ..NewRecipe::default()
        };
        let err = create_recipe(&store, &SequentialIds::new(), new, &author()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(store.is_empty());
    }

    #[test]
    fn list_skips_dangling_index_entries() {
        let store = MemoryStore::new();
        let ids = SequentialIds::new();
        create_recipe(&store, &ids, pancakes(), &author()).unwrap();
        save(&store, keys::RECIPE_INDEX, &json!(["recipe_1", "recipe_gone"])).unwrap();
        let recipes = list_recipes(&store).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].id, "recipe_1");
    }

    #[test]
    fn update_missing_recipe_is_not_found() {
        let store = MemoryStore::new();
        let err = update_recipe(&store, "recipe_x", RecipeUpdate::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::RecipeNotFound);
        assert_eq!(err.message, "Recipe not found: recipe_x");
    }

    #[test]
    fn update_merges_fields_and_keeps_id() {
        let store = MemoryStore::new();
        let ids = SequentialIds::new();
        create_recipe(&store, &ids, pancakes(), &author()).unwrap();
        let updated = update_recipe(
            &store,
            "recipe_1",
            RecipeUpdate {
                servings: Some(8),
                ingredients: Some(vec!["4 cups all-purpose flour".into()]),
                ..RecipeUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(updated.id, "recipe_1");
        assert_eq!(updated.servings, 8);
        assert_eq!(updated.name, "Fluffy Pancakes");
        assert_eq!(get_recipe(&store, "recipe_1").unwrap().unwrap().ingredients.len(), 1);
    }

    #[test]
    fn mark_made_sets_timestamp() {
        let store = MemoryStore::new();
        create_recipe(&store, &SequentialIds::new(), pancakes(), &author()).unwrap();
        let made = mark_made(&store, "recipe_1").unwrap();
        assert!(made.last_made.is_some());
    }

    #[test]
    fn delete_cascades_to_feedback_and_index() {
        let store = MemoryStore::new();
        let ids = SequentialIds::new();
        create_recipe(&store, &ids, pancakes(), &author()).unwrap();
        create_recipe(&store, &ids, pancakes(), &author()).unwrap();
        store.set("ratings:recipe_1", &json!({"user_mom": 5})).unwrap();
        store.set("comments:recipe_1", &json!([])).unwrap();
        store.set("photos:recipe_1", &json!([])).unwrap();

        delete_recipe(&store, "recipe_1").unwrap();

        assert!(get_recipe(&store, "recipe_1").unwrap().is_none());
        assert!(store.get("ratings:recipe_1").unwrap().is_none());
        assert!(store.get("comments:recipe_1").unwrap().is_none());
        assert!(store.get("photos:recipe_1").unwrap().is_none());
        assert_eq!(recipe_index(&store).unwrap(), vec!["recipe_2"]);
    }
}
