use std::collections::HashMap;

use rand::seq::SliceRandom;

use crate::db::feedback_repo::average_rating;
use crate::models::{Ratings, Recipe};

/// Total-time buckets (prep + cook minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    Quick,
    Medium,
    Long,
    VeryLong,
}

impl TimeBucket {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "quick" => Some(Self::Quick),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            "verylong" | "very-long" => Some(Self::VeryLong),
            _ => None,
        }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        match self {
            Self::Quick => minutes < 15,
            Self::Medium => (15..30).contains(&minutes),
            Self::Long => (30..60).contains(&minutes),
            Self::VeryLong => minutes >= 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Recent,
    Rating,
    Alphabetical,
    Random,
}

impl SortBy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "recent" => Some(Self::Recent),
            "rating" => Some(Self::Rating),
            "alphabetical" | "name" => Some(Self::Alphabetical),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub search: Option<String>,
    pub categories: Vec<String>,
    pub time: Option<TimeBucket>,
    pub author_id: Option<String>,
}

fn matches_search(recipe: &Recipe, needle: &str) -> bool {
    recipe.name.to_lowercase().contains(needle)
        || recipe.ingredients.iter().any(|i| i.to_lowercase().contains(needle))
        || recipe.author_name.to_lowercase().contains(needle)
}

pub fn filter_recipes(recipes: &[Recipe], filter: &RecipeFilter) -> Vec<Recipe> {
    let needle = filter
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());

    recipes
        .iter()
        .filter(|r| needle.as_deref().map_or(true, |n| matches_search(r, n)))
        .filter(|r| {
            filter.categories.is_empty()
                || filter.categories.iter().any(|c| r.categories.contains(c))
        })
        .filter(|r| filter.time.map_or(true, |t| t.contains(r.total_time())))
        .filter(|r| filter.author_id.as_deref().map_or(true, |a| r.author_id == a))
        .cloned()
        .collect()
}

/// Sorted copy. `ratings` maps recipe id to its ratings; recipes without an
/// entry average 0.
pub fn sort_recipes(
    recipes: &[Recipe],
    sort_by: SortBy,
    ratings: &HashMap<String, Ratings>,
) -> Vec<Recipe> {
    let mut sorted = recipes.to_vec();
    match sort_by {
        // RFC 3339 UTC timestamps order lexically
        SortBy::Recent => sorted.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
        SortBy::Rating => {
            let avg = |r: &Recipe| ratings.get(&r.id).map_or(0.0, average_rating);
            sorted.sort_by(|a, b| avg(b).total_cmp(&avg(a)));
        }
        SortBy::Alphabetical => {
            sorted.sort_by_cached_key(|r| r.name.to_lowercase());
        }
        SortBy::Random => sorted.shuffle(&mut rand::thread_rng()),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str, name: &str, minutes: u32, categories: &[&str], added: &str) -> Recipe {
        Recipe {
            id: id.into(),
            name: name.into(),
            photo_url: None,
            prep_time: minutes,
            cook_time: 0,
            servings: 4,
            categories: categories.iter().map(|c| (*c).to_owned()).collect(),
            ingredients: vec!["2 cups all-purpose flour".into()],
            instructions: Vec::new(),
            author_id: if id == "r3" { "user_dad".into() } else { "user_mom".into() },
            author_name: if id == "r3" { "Dad".into() } else { "Mom".into() },
            date_added: added.into(),
            last_made: None,
        }
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe("r1", "Pancakes", 20, &["Breakfast"], "2026-10-01T08:00:00+00:00"),
            recipe("r2", "bolognese", 60, &["Dinner", "Italian"], "2026-10-03T08:00:00+00:00"),
            recipe("r3", "Garden Salad", 10, &["Lunch"], "2026-10-02T08:00:00+00:00"),
        ]
    }

    fn ids(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn search_covers_name_ingredients_and_author() {
        let all = sample();
        let by_name = RecipeFilter { search: Some("SALAD".into()), ..Default::default() };
        assert_eq!(ids(&filter_recipes(&all, &by_name)), vec!["r3"]);

        let by_ingredient = RecipeFilter { search: Some("flour".into()), ..Default::default() };
        assert_eq!(filter_recipes(&all, &by_ingredient).len(), 3);

        let by_author = RecipeFilter { search: Some("dad".into()), ..Default::default() };
        assert_eq!(ids(&filter_recipes(&all, &by_author)), vec!["r3"]);
    }

    #[test]
    fn categories_match_any() {
        let filter = RecipeFilter {
            categories: vec!["Italian".into(), "Lunch".into()],
            ..Default::default()
        };
        assert_eq!(ids(&filter_recipes(&sample(), &filter)), vec!["r2", "r3"]);
    }

    #[test]
    fn time_buckets_use_total_minutes() {
        assert!(TimeBucket::Quick.contains(14));
        assert!(TimeBucket::Medium.contains(15));
        assert!(TimeBucket::Long.contains(59));
        assert!(TimeBucket::VeryLong.contains(60));

        let filter = RecipeFilter { time: Some(TimeBucket::Medium), ..Default::default() };
        assert_eq!(ids(&filter_recipes(&sample(), &filter)), vec!["r1"]);
    }

    #[test]
    fn huge_times_land_in_the_longest_bucket() {
        let mut slow = recipe("r4", "Sourdough", u32::MAX, &[], "2026-10-04T08:00:00+00:00");
        slow.cook_time = 1;
        assert_eq!(slow.total_time(), u32::MAX);

        let all = vec![slow];
        let filter = RecipeFilter { time: Some(TimeBucket::VeryLong), ..Default::default() };
        assert_eq!(ids(&filter_recipes(&all, &filter)), vec!["r4"]);
        let quick = RecipeFilter { time: Some(TimeBucket::Quick), ..Default::default() };
        assert!(filter_recipes(&all, &quick).is_empty());
    }

    #[test]
    fn author_filter_is_exact() {
        let filter = RecipeFilter { author_id: Some("user_mom".into()), ..Default::default() };
        assert_eq!(ids(&filter_recipes(&sample(), &filter)), vec!["r1", "r2"]);
    }

    #[test]
    fn sort_recent_alphabetical_and_rating() {
        let all = sample();
        let none = HashMap::new();
        assert_eq!(ids(&sort_recipes(&all, SortBy::Recent, &none)), vec!["r2", "r3", "r1"]);
        assert_eq!(ids(&sort_recipes(&all, SortBy::Alphabetical, &none)), vec!["r2", "r3", "r1"]);

        let mut ratings = HashMap::new();
        ratings.insert("r1".to_owned(), Ratings::from([("u1".to_owned(), 5)]));
        ratings.insert("r3".to_owned(), Ratings::from([("u1".to_owned(), 3), ("u2".to_owned(), 4)]));
        assert_eq!(ids(&sort_recipes(&all, SortBy::Rating, &ratings)), vec!["r1", "r3", "r2"]);
    }

    #[test]
    fn random_sort_keeps_every_recipe() {
        let mut shuffled = ids(&sort_recipes(&sample(), SortBy::Random, &HashMap::new()))
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        shuffled.sort();
        assert_eq!(shuffled, vec!["r1", "r2", "r3"]);
    }
}
