use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub author_id: String,
    pub author_name: String,
    pub date_added: String,
    pub last_made: Option<String>,
}

impl Recipe {
    /// Prep plus cook minutes, capped at `u32::MAX`.
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }
}

/// Fields supplied when creating a recipe; id, author and timestamps are
/// filled in by the repository.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub prep_time: u32,
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

fn default_servings() -> u32 {
    1
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub categories: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
}

impl RecipeUpdate {
    pub fn apply(self, recipe: &mut Recipe) {
        if let Some(name) = self.name {
            recipe.name = name;
        }
        if let Some(url) = self.photo_url {
            recipe.photo_url = Some(url);
        }
        if let Some(prep) = self.prep_time {
            recipe.prep_time = prep;
        }
        if let Some(cook) = self.cook_time {
            recipe.cook_time = cook;
        }
        if let Some(servings) = self.servings {
            recipe.servings = servings;
        }
        if let Some(categories) = self.categories {
            recipe.categories = categories;
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = instructions;
        }
    }
}
