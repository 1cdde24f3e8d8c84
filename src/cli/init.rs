use std::path::Path;

use serde_json::json;

use crate::cli::{finish, print_success};
use crate::db::{connection, seed};
use crate::error::RecipeboxError;
use crate::ids::UlidIds;

pub fn run(demo: bool, json_output: bool, db: Option<&Path>) -> i32 {
    finish(run_inner(demo, json_output, db), json_output)
}

fn run_inner(demo: bool, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let path = connection::db_path(db);
    let store = connection::init_store(&path)?;
    let report = if demo {
        Some(seed::seed_demo_data(&store, &UlidIds)?)
    } else {
        None
    };

    if json_output {
        print_success(json!({
            "path": path.to_string_lossy(),
            "demo": report
        }));
    } else {
        println!("Initialized recipebox at {}", path.display());
        if let Some(r) = report {
            println!(
                "Demo data: {} profiles, {} recipes",
                r.users_created, r.recipes_created
            );
        }
    }
    Ok(0)
}
