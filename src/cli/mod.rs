pub mod commands;
pub mod init;
pub mod plan;
pub mod recipe;
pub mod shop;
pub mod user;

pub use commands::*;

use std::path::Path;

use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::db::connection::{self, SqliteStore};
use crate::error::RecipeboxError;
use crate::models::meal_plan::{parse_date_key, week_start};
use crate::models::MealSlot;
use crate::output;

/// Turn a handler result into an exit code, reporting errors on the
/// channel matching the output mode.
pub fn finish(result: Result<i32, RecipeboxError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(code = e.code.as_str(), "command failed");
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

pub fn print_success(data: Value) {
    output::json::print(&output::json::success(data));
}

pub fn open(db: Option<&Path>) -> Result<SqliteStore, RecipeboxError> {
    connection::open_store(&connection::db_path(db))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, RecipeboxError> {
    parse_date_key(s.trim())
        .ok_or_else(|| RecipeboxError::validation(format!("Invalid date '{s}' (expected YYYY-MM-DD)")))
}

pub fn parse_slot(s: &str) -> Result<MealSlot, RecipeboxError> {
    MealSlot::from_str(s.trim()).ok_or_else(|| {
        RecipeboxError::validation(format!("Invalid slot '{s}' (expected breakfast, lunch or dinner)"))
    })
}

/// Monday of the given date's week, or of today's.
pub fn resolve_week(week: Option<&str>) -> Result<NaiveDate, RecipeboxError> {
    let date = match week {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    Ok(week_start(date))
}
