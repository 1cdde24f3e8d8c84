use chrono::Utc;

use crate::db::kv::{keys, load_or, save, KeyValueStore};
use crate::error::RecipeboxError;
use crate::ids::IdGenerator;
use crate::models::{Comment, Photo, Ratings, User};

pub fn get_ratings(store: &dyn KeyValueStore, recipe_id: &str) -> Result<Ratings, RecipeboxError> {
    load_or(store, &keys::ratings(recipe_id), Ratings::new())
}

/// Set (or replace) one user's rating. Ratings run 1 through 5.
pub fn set_rating(
    store: &dyn KeyValueStore,
    recipe_id: &str,
    user_id: &str,
    rating: u8,
) -> Result<Ratings, RecipeboxError> {
    if !(1..=5).contains(&rating) {
        return Err(RecipeboxError::validation(format!(
            "Rating must be between 1 and 5, got {rating}"
        )));
    }
    let mut ratings = get_ratings(store, recipe_id)?;
    ratings.insert(user_id.to_owned(), rating);
    save(store, &keys::ratings(recipe_id), &ratings)?;
    Ok(ratings)
}

pub fn average_rating(ratings: &Ratings) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.values().map(|r| u32::from(*r)).sum();
    f64::from(sum) / ratings.len() as f64
}

pub fn get_comments(store: &dyn KeyValueStore, recipe_id: &str) -> Result<Vec<Comment>, RecipeboxError> {
    load_or(store, &keys::comments(recipe_id), Vec::new())
}

pub fn add_comment(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    recipe_id: &str,
    user: &User,
    text: &str,
) -> Result<Comment, RecipeboxError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RecipeboxError::validation("Comment must not be empty"));
    }
    let comment = Comment {
        id: ids.next_id("comment"),
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        text: text.to_owned(),
        date: Utc::now().to_rfc3339(),
    };
    let mut comments = get_comments(store, recipe_id)?;
    comments.push(comment.clone());
    save(store, &keys::comments(recipe_id), &comments)?;
    Ok(comment)
}

pub fn get_photos(store: &dyn KeyValueStore, recipe_id: &str) -> Result<Vec<Photo>, RecipeboxError> {
    load_or(store, &keys::photos(recipe_id), Vec::new())
}

pub fn add_photo(
    store: &dyn KeyValueStore,
    ids: &dyn IdGenerator,
    recipe_id: &str,
    user: &User,
    url: &str,
) -> Result<Photo, RecipeboxError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(RecipeboxError::validation("Photo URL must not be empty"));
    }
    let photo = Photo {
        id: ids.next_id("photo"),
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        url: url.to_owned(),
        date: Utc::now().to_rfc3339(),
    };
    let mut photos = get_photos(store, recipe_id)?;
    photos.push(photo.clone());
    save(store, &keys::photos(recipe_id), &photos)?;
    Ok(photo)
}
