use serde_json::{json, Value};

use crate::db::feedback_repo::average_rating;
use crate::error::RecipeboxError;
use crate::models::{Comment, MealPlan, MealSlot, Photo, Ratings, Recipe, ShoppingList, User};

pub fn print(value: &Value) {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    println!("{text}");
}

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &RecipeboxError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn user_json(u: &User) -> Value {
    json!({
        "id": u.id,
        "name": u.name,
        "color": u.color,
        "created": u.created
    })
}

pub fn recipe_summary(r: &Recipe, ratings: Option<&Ratings>) -> Value {
    let mut v = json!({
        "id": r.id,
        "name": r.name,
        "total_time": r.total_time(),
        "servings": r.servings,
        "categories": r.categories,
        "author_name": r.author_name
    });
    if let Some(ratings) = ratings {
        v["average_rating"] = json!(round1(average_rating(ratings)));
    }
    v
}

pub fn recipe_detail(r: &Recipe, ratings: &Ratings, comments: &[Comment], photos: &[Photo]) -> Value {
    json!({
        "id": r.id,
        "name": r.name,
        "photo_url": r.photo_url,
        "prep_time": r.prep_time,
        "cook_time": r.cook_time,
        "servings": r.servings,
        "categories": r.categories,
        "ingredients": r.ingredients,
        "instructions": r.instructions,
        "author_id": r.author_id,
        "author_name": r.author_name,
        "date_added": r.date_added,
        "last_made": r.last_made,
        "ratings": ratings,
        "average_rating": round1(average_rating(ratings)),
        "comments": comments,
        "photos": photos
    })
}

/// Days in date order; each slot carries the recipe id and, when it still
/// resolves, the recipe name.
pub fn meal_plan_json(plan: &MealPlan, recipe_name: impl Fn(&str) -> Option<String>) -> Value {
    let days: Vec<Value> = plan
        .days
        .iter()
        .map(|(date, meals)| {
            let mut day = json!({ "date": date });
            for slot in MealSlot::ALL {
                day[slot.as_str()] = match meals.get(slot) {
                    Some(id) => json!({ "recipe_id": id, "recipe_name": recipe_name(id) }),
                    None => Value::Null,
                };
            }
            day
        })
        .collect();
    json!({
        "week_of": plan.week_of,
        "days": days
    })
}

/// Categories as an ordered array so aisle order survives JSON object
/// key sorting.
pub fn shopping_list_json(week_key: &str, list: &ShoppingList) -> Value {
    let categories: Vec<Value> = list
        .categories()
        .map(|(category, items)| {
            json!({
                "category": category.as_str(),
                "items": items
            })
        })
        .collect();
    json!({
        "week_of": week_key,
        "total_items": list.total_items(),
        "checked_items": list.checked_items(),
        "categories": categories
    })
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
