use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::kv::KeyValueStore;
use crate::db::{recipe_repo, user_repo};
use crate::error::RecipeboxError;
use crate::ids::IdGenerator;
use crate::models::NewRecipe;

const DEMO_RECIPES: &str = include_str!("demo_recipes.json");

#[derive(Deserialize)]
struct DemoRecipe {
    author: String,
    #[serde(flatten)]
    recipe: NewRecipe,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct SeedReport {
    pub users_created: usize,
    pub recipes_created: usize,
}

/// Create the "Mom" and "Dad" profiles and the demo recipes. Does nothing
/// if any profile exists; skips recipes if the recipe index is non-empty.
pub fn seed_demo_data(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
) -> Result<SeedReport, RecipeboxError> {
    let mut report = SeedReport::default();
    if !user_repo::list_users(store)?.is_empty() {
        info!("profiles already exist, skipping demo data");
        return Ok(report);
    }

    let mom = user_repo::create_user(store, ids, "Mom")?;
    let dad = user_repo::create_user(store, ids, "Dad")?;
    user_repo::set_current_user(store, &mom)?;
    report.users_created = 2;

    if !recipe_repo::recipe_index(store)?.is_empty() {
        info!("recipes already exist, skipping demo recipes");
        return Ok(report);
    }

    let demos: Vec<DemoRecipe> = serde_json::from_str(DEMO_RECIPES)
        .map_err(|e| RecipeboxError::validation(format!("Invalid demo data: {e}")))?;
    for demo in demos {
        let author = if demo.author == dad.name { &dad } else { &mom };
        recipe_repo::create_recipe(store, ids, demo.recipe, author)?;
        report.recipes_created += 1;
    }
    Ok(report)
}
