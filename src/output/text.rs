use crate::db::feedback_repo::average_rating;
use crate::models::{Comment, MealPlan, MealSlot, Photo, Ratings, Recipe, ShoppingList, User};

pub fn print_user_list(users: &[User], current_id: Option<&str>) {
    if users.is_empty() {
        println!("No users yet.");
        return;
    }
    for u in users {
        let marker = if Some(u.id.as_str()) == current_id { " *" } else { "" };
        println!("  {} ({}) {}{}", u.name, u.id, u.color, marker);
    }
}

pub fn print_recipe_list(recipes: &[Recipe], rating_of: impl Fn(&str) -> f64) {
    if recipes.is_empty() {
        println!("No recipes found.");
        return;
    }
    for r in recipes {
        let rating = rating_of(&r.id);
        let stars = if rating > 0.0 { format!(" ★{rating:.1}") } else { String::new() };
        println!(
            "  {} ({}) {}min, serves {} - by {}{}",
            r.name,
            r.id,
            r.total_time(),
            r.servings,
            r.author_name,
            stars
        );
    }
}

pub fn print_recipe(r: &Recipe, ratings: &Ratings, comments: &[Comment], photos: &[Photo]) {
    println!("Recipe: {} ({})", r.name, r.id);
    println!("  By {} on {}", r.author_name, r.date_added);
    println!(
        "  Prep {}min, cook {}min, serves {}",
        r.prep_time, r.cook_time, r.servings
    );
    if !r.categories.is_empty() {
        println!("  Categories: {}", r.categories.join(", "));
    }
    if let Some(ref made) = r.last_made {
        println!("  Last made: {made}");
    }
    if !ratings.is_empty() {
        println!("  Rating: {:.1} ({} votes)", average_rating(ratings), ratings.len());
    }
    println!("\nIngredients:");
    for line in &r.ingredients {
        println!("  - {line}");
    }
    println!("\nInstructions:");
    for (i, step) in r.instructions.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
    if !comments.is_empty() {
        println!("\nComments:");
        for c in comments {
            println!("  {}: {}", c.user_name, c.text);
        }
    }
    if !photos.is_empty() {
        println!("\nPhotos:");
        for p in photos {
            println!("  {} ({})", p.url, p.user_name);
        }
    }
}

pub fn print_meal_plan(plan: &MealPlan, recipe_name: impl Fn(&str) -> Option<String>) {
    println!("Week of {}", plan.week_of);
    for (date, meals) in &plan.days {
        println!("  {date}");
        for slot in MealSlot::ALL {
            let label = match meals.get(slot) {
                Some(id) => recipe_name(id).unwrap_or_else(|| format!("(missing recipe {id})")),
                None => "-".to_owned(),
            };
            println!("    {:<9} {label}", slot.as_str());
        }
    }
}

pub fn print_shopping_list(week_key: &str, list: &ShoppingList) {
    println!(
        "Shopping list for week of {week_key}: {}/{} checked",
        list.checked_items(),
        list.total_items()
    );
    if list.total_items() == 0 {
        println!("  (empty)");
        return;
    }
    for (category, items) in list.categories() {
        if items.is_empty() {
            continue;
        }
        println!("\n{}:", category.as_str());
        for i in items {
            let mark = if i.checked { "x" } else { " " };
            let amount = [i.quantity.as_str(), i.unit.as_str()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            if amount.is_empty() {
                println!("  [{mark}] {} ({})", i.item, i.id);
            } else {
                println!("  [{mark}] {amount} {} ({})", i.item, i.id);
            }
        }
    }
}
