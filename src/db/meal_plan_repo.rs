use chrono::NaiveDate;
use tracing::info;

use crate::db::kv::{keys, load, save, KeyValueStore};
use crate::error::RecipeboxError;
use crate::models::meal_plan::{date_key, week_start};
use crate::models::{MealPlan, MealSlot};

/// The stored plan for the week, or a fresh all-empty one. A fresh plan
/// is not persisted until a slot is written.
pub fn get_or_create(
    store: &dyn KeyValueStore,
    week_start: NaiveDate,
) -> Result<MealPlan, RecipeboxError> {
    let stored = load(store, &keys::meal_plan(&date_key(week_start)))?;
    Ok(stored.unwrap_or_else(|| MealPlan::empty(week_start)))
}

pub fn save_plan(store: &dyn KeyValueStore, plan: &MealPlan) -> Result<(), RecipeboxError> {
    save(store, &keys::meal_plan(&plan.week_of), plan)
}

/// Put `recipe_id` in one slot (`None` clears it) and persist the week.
pub fn assign(
    store: &dyn KeyValueStore,
    date: NaiveDate,
    slot: MealSlot,
    recipe_id: Option<&str>,
) -> Result<MealPlan, RecipeboxError> {
    let mut plan = get_or_create(store, week_start(date))?;
    plan.days
        .entry(date_key(date))
        .or_default()
        .set(slot, recipe_id.map(str::to_owned));
    save_plan(store, &plan)?;
    info!(date = %date, slot = slot.as_str(), recipe_id, "assigned meal slot");
    Ok(plan)
}

pub fn clear_slot(
    store: &dyn KeyValueStore,
    date: NaiveDate,
    slot: MealSlot,
) -> Result<MealPlan, RecipeboxError> {
    assign(store, date, slot, None)
}

/// Distinct recipe ids planned anywhere in the week.
pub fn week_recipe_ids(
    store: &dyn KeyValueStore,
    week_start: NaiveDate,
) -> Result<Vec<String>, RecipeboxError> {
    Ok(get_or_create(store, week_start)?.recipe_ids())
}
