use std::collections::HashMap;
use std::path::Path;

use serde_json::json;

use crate::cli::commands::{RecipeCommands, RecipeFields};
use crate::cli::{finish, open, print_success};
use crate::db::feedback_repo::{self, average_rating};
use crate::db::kv::KeyValueStore;
use crate::db::{recipe_repo, user_repo};
use crate::error::RecipeboxError;
use crate::ids::UlidIds;
use crate::models::{NewRecipe, Recipe, RecipeUpdate};
use crate::output;
use crate::search::{self, RecipeFilter, SortBy, TimeBucket};

pub fn run(cmd: RecipeCommands, json_output: bool, db: Option<&Path>) -> i32 {
    let result = match cmd {
        RecipeCommands::Add { fields } => run_add(fields, json_output, db),
        RecipeCommands::List { search, categories, time, author, sort } => {
            run_list(search, categories, time.as_deref(), author, &sort, json_output, db)
        }
        RecipeCommands::Show { id } => run_show(&id, json_output, db),
        RecipeCommands::Update { id, fields } => run_update(&id, fields, json_output, db),
        RecipeCommands::Made { id } => run_made(&id, json_output, db),
        RecipeCommands::Delete { id } => run_delete(&id, json_output, db),
        RecipeCommands::Rate { id, rating } => run_rate(&id, rating, json_output, db),
        RecipeCommands::Comment { id, text } => run_comment(&id, &text, json_output, db),
        RecipeCommands::Photo { id, url } => run_photo(&id, &url, json_output, db),
    };
    finish(result, json_output)
}

fn non_empty(list: Vec<String>) -> Option<Vec<String>> {
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

/// Current user, who must have written the recipe.
fn require_author(store: &dyn KeyValueStore, recipe: &Recipe) -> Result<(), RecipeboxError> {
    let user = user_repo::require_current_user(store)?;
    if user.id != recipe.author_id {
        return Err(RecipeboxError::not_author(&recipe.name));
    }
    Ok(())
}

fn run_add(fields: RecipeFields, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let author = user_repo::require_current_user(&store)?;
    let name = fields
        .name
        .ok_or_else(|| RecipeboxError::validation("--name is required"))?;
    let new = NewRecipe {
        name,
        photo_url: fields.photo_url,
        prep_time: fields.prep.unwrap_or(0),
        cook_time: fields.cook.unwrap_or(0),
        servings: fields.servings.unwrap_or(1),
        categories: fields.categories,
        ingredients: fields.ingredients,
        instructions: fields.steps,
    };
    let recipe = recipe_repo::create_recipe(&store, &UlidIds, new, &author)?;

    if json_output {
        print_success(json!({ "recipe": output::json::recipe_summary(&recipe, None) }));
    } else {
        println!("Added recipe: {} ({})", recipe.name, recipe.id);
    }
    Ok(0)
}

fn run_list(
    search_text: Option<String>,
    categories: Vec<String>,
    time: Option<&str>,
    author: Option<String>,
    sort: &str,
    json_output: bool,
    db: Option<&Path>,
) -> Result<i32, RecipeboxError> {
    let time = time
        .map(|t| {
            TimeBucket::from_str(t).ok_or_else(|| {
                RecipeboxError::validation(format!(
                    "Invalid time '{t}' (expected quick, medium, long or verylong)"
                ))
            })
        })
        .transpose()?;
    let sort_by = SortBy::from_str(sort).ok_or_else(|| {
        RecipeboxError::validation(format!(
            "Invalid sort '{sort}' (expected recent, rating, alphabetical or random)"
        ))
    })?;

    let store = open(db)?;
    let all = recipe_repo::list_recipes(&store)?;
    let mut ratings = HashMap::new();
    for r in &all {
        ratings.insert(r.id.clone(), feedback_repo::get_ratings(&store, &r.id)?);
    }

    let filter = RecipeFilter {
        search: search_text,
        categories,
        time,
        author_id: author,
    };
    let recipes = search::sort_recipes(&search::filter_recipes(&all, &filter), sort_by, &ratings);

    if json_output {
        let recipes_json: Vec<_> = recipes
            .iter()
            .map(|r| output::json::recipe_summary(r, ratings.get(&r.id)))
            .collect();
        print_success(json!({
            "recipes": recipes_json,
            "total": all.len()
        }));
    } else {
        output::text::print_recipe_list(&recipes, |id| {
            ratings.get(id).map_or(0.0, average_rating)
        });
    }
    Ok(0)
}

fn run_show(id: &str, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let recipe = recipe_repo::require_recipe(&store, id)?;
    let ratings = feedback_repo::get_ratings(&store, id)?;
    let comments = feedback_repo::get_comments(&store, id)?;
    let photos = feedback_repo::get_photos(&store, id)?;

    if json_output {
        print_success(json!({
            "recipe": output::json::recipe_detail(&recipe, &ratings, &comments, &photos)
        }));
    } else {
        output::text::print_recipe(&recipe, &ratings, &comments, &photos);
    }
    Ok(0)
}

fn run_update(
    id: &str,
    fields: RecipeFields,
    json_output: bool,
    db: Option<&Path>,
) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let existing = recipe_repo::require_recipe(&store, id)?;
    require_author(&store, &existing)?;

    let update = RecipeUpdate {
        name: fields.name,
        photo_url: fields.photo_url,
        prep_time: fields.prep,
        cook_time: fields.cook,
        servings: fields.servings,
        categories: non_empty(fields.categories),
        ingredients: non_empty(fields.ingredients),
        instructions: non_empty(fields.steps),
    };
    let recipe = recipe_repo::update_recipe(&store, id, update)?;

    if json_output {
        print_success(json!({ "recipe": output::json::recipe_summary(&recipe, None) }));
    } else {
        println!("Updated recipe: {} ({})", recipe.name, recipe.id);
    }
    Ok(0)
}

fn run_made(id: &str, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let recipe = recipe_repo::mark_made(&store, id)?;

    if json_output {
        print_success(json!({
            "id": recipe.id,
            "last_made": recipe.last_made
        }));
    } else {
        println!("Marked {} as made", recipe.name);
    }
    Ok(0)
}

fn run_delete(id: &str, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let recipe = recipe_repo::require_recipe(&store, id)?;
    require_author(&store, &recipe)?;
    recipe_repo::delete_recipe(&store, id)?;

    if json_output {
        print_success(json!({ "deleted": id }));
    } else {
        println!("Deleted recipe: {} ({})", recipe.name, id);
    }
    Ok(0)
}

fn run_rate(id: &str, rating: u8, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let user = user_repo::require_current_user(&store)?;
    recipe_repo::require_recipe(&store, id)?;
    let ratings = feedback_repo::set_rating(&store, id, &user.id, rating)?;
    let average = average_rating(&ratings);

    if json_output {
        print_success(json!({
            "recipe_id": id,
            "rating": rating,
            "average_rating": average,
            "votes": ratings.len()
        }));
    } else {
        println!("Rated {rating}/5 (average {average:.1} from {} votes)", ratings.len());
    }
    Ok(0)
}

fn run_comment(id: &str, text: &str, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let user = user_repo::require_current_user(&store)?;
    recipe_repo::require_recipe(&store, id)?;
    let comment = feedback_repo::add_comment(&store, &UlidIds, id, &user, text)?;

    if json_output {
        print_success(json!({ "comment": comment }));
    } else {
        println!("Comment added ({})", comment.id);
    }
    Ok(0)
}

fn run_photo(id: &str, url: &str, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let user = user_repo::require_current_user(&store)?;
    recipe_repo::require_recipe(&store, id)?;
    let photo = feedback_repo::add_photo(&store, &UlidIds, id, &user, url)?;

    if json_output {
        print_success(json!({ "photo": photo }));
    } else {
        println!("Photo added ({})", photo.id);
    }
    Ok(0)
}
