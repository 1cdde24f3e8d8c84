use std::path::Path;

use chrono::NaiveDate;

use crate::cli::commands::ShopCommands;
use crate::cli::{finish, open, print_success, resolve_week};
use crate::error::RecipeboxError;
use crate::ids::UlidIds;
use crate::models::meal_plan::date_key;
use crate::models::{Category, ShoppingList};
use crate::output;
use crate::shopping::weekly;

pub fn run(cmd: ShopCommands, json_output: bool, db: Option<&Path>) -> i32 {
    let result = match cmd {
        ShopCommands::Show { week } => run_show(week.as_deref(), json_output, db),
        ShopCommands::Regenerate { week } => run_regenerate(week.as_deref(), json_output, db),
        ShopCommands::Toggle { item_id, week } => {
            run_toggle(&item_id, week.as_deref(), json_output, db)
        }
        ShopCommands::Add { text, category, week } => {
            run_add(&text, category.as_deref(), week.as_deref(), json_output, db)
        }
        ShopCommands::Remove { item_id, week } => {
            run_remove(&item_id, week.as_deref(), json_output, db)
        }
        ShopCommands::ClearChecked { week } => run_clear_checked(week.as_deref(), json_output, db),
    };
    finish(result, json_output)
}

fn print_list(week_start: NaiveDate, list: &ShoppingList, json_output: bool) {
    let week_key = date_key(week_start);
    if json_output {
        print_success(output::json::shopping_list_json(&week_key, list));
    } else {
        output::text::print_shopping_list(&week_key, list);
    }
}

fn run_show(week: Option<&str>, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let week_start = resolve_week(week)?;
    let store = open(db)?;
    let list = weekly::load_or_generate(&store, &UlidIds, week_start)?;
    print_list(week_start, &list, json_output);
    Ok(0)
}

fn run_regenerate(week: Option<&str>, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let week_start = resolve_week(week)?;
    let store = open(db)?;
    let list = weekly::regenerate(&store, &UlidIds, week_start)?;
    print_list(week_start, &list, json_output);
    Ok(0)
}

fn run_toggle(
    item_id: &str,
    week: Option<&str>,
    json_output: bool,
    db: Option<&Path>,
) -> Result<i32, RecipeboxError> {
    let week_start = resolve_week(week)?;
    let store = open(db)?;
    let list = weekly::toggle_item(&store, &UlidIds, week_start, item_id)?;
    if list.find(item_id).is_none() {
        tracing::warn!(item_id, "no shopping list item with this id");
    }
    print_list(week_start, &list, json_output);
    Ok(0)
}

fn run_add(
    text: &str,
    category: Option<&str>,
    week: Option<&str>,
    json_output: bool,
    db: Option<&Path>,
) -> Result<i32, RecipeboxError> {
    let category = match category {
        Some(c) => Category::from_str(c)
            .ok_or_else(|| RecipeboxError::validation(format!("Unknown category '{c}'")))?,
        None => Category::Other,
    };
    let week_start = resolve_week(week)?;
    let store = open(db)?;
    let list = weekly::add_item(&store, &UlidIds, week_start, text, category)?;
    print_list(week_start, &list, json_output);
    Ok(0)
}

fn run_remove(
    item_id: &str,
    week: Option<&str>,
    json_output: bool,
    db: Option<&Path>,
) -> Result<i32, RecipeboxError> {
    let week_start = resolve_week(week)?;
    let store = open(db)?;
    let list = weekly::remove_item(&store, &UlidIds, week_start, item_id)?;
    print_list(week_start, &list, json_output);
    Ok(0)
}

fn run_clear_checked(week: Option<&str>, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let week_start = resolve_week(week)?;
    let store = open(db)?;
    let list = weekly::clear_checked(&store, &UlidIds, week_start)?;
    print_list(week_start, &list, json_output);
    Ok(0)
}
