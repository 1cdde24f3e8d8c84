use std::path::Path;

use serde_json::json;

use crate::cli::commands::UserCommands;
use crate::cli::{finish, open, print_success};
use crate::db::user_repo;
use crate::error::RecipeboxError;
use crate::ids::UlidIds;
use crate::output;

pub fn run(cmd: UserCommands, json_output: bool, db: Option<&Path>) -> i32 {
    let result = match cmd {
        UserCommands::Add { name } => run_add(&name, json_output, db),
        UserCommands::List => run_list(json_output, db),
        UserCommands::Switch { id } => run_switch(&id, json_output, db),
        UserCommands::Current => run_current(json_output, db),
    };
    finish(result, json_output)
}

fn run_add(name: &str, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let user = user_repo::create_user(&store, &UlidIds, name)?;
    let current = user_repo::resolve_current_user(&store)?;
    let is_current = current.as_ref().is_some_and(|c| c.id == user.id);

    if json_output {
        print_success(json!({
            "user": output::json::user_json(&user),
            "current": is_current
        }));
    } else {
        println!("Added user: {} ({})", user.name, user.id);
    }
    Ok(0)
}

fn run_list(json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let current = user_repo::resolve_current_user(&store)?;
    let current_id = current.as_ref().map(|u| u.id.as_str());
    let users = user_repo::list_users(&store)?;

    if json_output {
        let users_json: Vec<_> = users.iter().map(output::json::user_json).collect();
        print_success(json!({
            "users": users_json,
            "current_user_id": current_id
        }));
    } else {
        output::text::print_user_list(&users, current_id);
    }
    Ok(0)
}

fn run_switch(id: &str, json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let user = user_repo::get_user(&store, id)?.ok_or_else(|| RecipeboxError::user_not_found(id))?;
    user_repo::set_current_user(&store, &user)?;

    if json_output {
        print_success(json!({ "user": output::json::user_json(&user) }));
    } else {
        println!("Switched to {}", user.name);
    }
    Ok(0)
}

fn run_current(json_output: bool, db: Option<&Path>) -> Result<i32, RecipeboxError> {
    let store = open(db)?;
    let user = user_repo::require_current_user(&store)?;

    if json_output {
        print_success(json!({ "user": output::json::user_json(&user) }));
    } else {
        println!("{} ({})", user.name, user.id);
    }
    Ok(0)
}
