use std::path::Path;

use serde_json::json;

use crate::cli::commands::PlanCommands;
use crate::cli::{finish, open, parse_date, parse_slot, print_success, resolve_week};
use crate::db::kv::KeyValueStore;
use crate::db::{meal_plan_repo, recipe_repo};
use crate::error::RecipeboxError;
use crate::models::MealPlan;
use crate::output;

pub fn run(cmd: PlanCommands, json_output: bool, db: Option<&Path>) -> i32 {
    let result = match cmd {
        PlanCommands::Show { week } => run_show(week.as_deref(), json_output, db),
        PlanCommands::Assign { date, slot, recipe_id } => {
            run_assign(&date, &slot, &recipe_id, json_output, db)
        }
        PlanCommands::Clear { date, slot } => run_clear(&date, &slot, json_output, db),
    };
    finish(result, json_output)
}

fn print_plan(store: &dyn KeyValueStore, plan: &MealPlan, json_output: bool) {
    // a slot whose recipe was deleted shows no name
    let name_of = |id: &str| {
        recipe_repo::get_recipe(store, id)
            .ok()
            .flatten()
            .map(|r| r.name)
    };
    if json_output {
        print_success(json!({ "plan": output::json::meal_plan_json(plan, name_of) }));
    } else {
        output::text::print_meal_plan(plan, name_of);
    }
}

fn run_show(week: Option<&str>, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let week_start = resolve_week(week)?;
    let store = open(db)?;
    let plan = meal_plan_repo::get_or_create(&store, week_start)?;
    print_plan(&store, &plan, json_output);
    Ok(0)
}

fn run_assign(
    date: &str,
    slot: &str,
    recipe_id: &str,
    json_output: bool,
    db: Option<&Path>,
) -> Result<i32, RecipeboxError> {
    let date = parse_date(date)?;
    let slot = parse_slot(slot)?;
    let store = open(db)?;
    recipe_repo::require_recipe(&store, recipe_id)?;
    let plan = meal_plan_repo::assign(&store, date, slot, Some(recipe_id))?;
    print_plan(&store, &plan, json_output);
    Ok(0)
}

fn run_clear(date: &str, slot: &str, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let date = parse_date(date)?;
    let slot = parse_slot(slot)?;
    let store = open(db)?;
    let plan = meal_plan_repo::clear_slot(&store, date, slot)?;
    print_plan(&store, &plan, json_output);
    Ok(0)
}
