use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Grocery aisle. Declaration order is the display order of a shopping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Produce,
    #[serde(rename = "Dairy & Eggs")]
    DairyEggs,
    #[serde(rename = "Meat & Seafood")]
    MeatSeafood,
    Pantry,
    Frozen,
    Bakery,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::Produce,
        Self::DairyEggs,
        Self::MeatSeafood,
        Self::Pantry,
        Self::Frozen,
        Self::Bakery,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Produce => "Produce",
            Self::DairyEggs => "Dairy & Eggs",
            Self::MeatSeafood => "Meat & Seafood",
            Self::Pantry => "Pantry",
            Self::Frozen => "Frozen",
            Self::Bakery => "Bakery",
            Self::Other => "Other",
        }
    }

    /// Accepts the display name or a slug (`dairy-eggs`, `meat`), any case.
    pub fn from_str(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        if let Some(category) = Self::ALL.iter().find(|c| c.as_str().to_lowercase() == wanted) {
            return Some(*category);
        }
        match wanted.as_str() {
            "dairy" | "eggs" | "dairy-eggs" | "dairy-and-eggs" => Some(Self::DairyEggs),
            "meat" | "seafood" | "meat-seafood" | "meat-and-seafood" => Some(Self::MeatSeafood),
            _ => None,
        }
    }
}

/// One free-text ingredient line split into quantity, unit and item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    pub quantity: String,
    pub unit: String,
    pub item: String,
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub item: String,
    pub quantity: String,
    pub unit: String,
    pub original: String,
    pub category: Category,
    pub checked: bool,
}

/// Items grouped by aisle. Persisted as a JSON object keyed by category
/// display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList(pub BTreeMap<Category, Vec<ShoppingListItem>>);

impl ShoppingList {
    /// Every category present, all empty.
    pub fn empty() -> Self {
        Self(Category::ALL.iter().map(|c| (*c, Vec::new())).collect())
    }

    pub fn categories(&self) -> impl Iterator<Item = (&Category, &Vec<ShoppingListItem>)> {
        self.0.iter()
    }

    pub fn items(&self, category: Category) -> &[ShoppingListItem] {
        self.0.get(&category).map_or(&[], Vec::as_slice)
    }

    pub fn all_items(&self) -> impl Iterator<Item = &ShoppingListItem> {
        self.0.values().flatten()
    }

    pub fn find(&self, item_id: &str) -> Option<&ShoppingListItem> {
        self.all_items().find(|i| i.id == item_id)
    }

    pub fn total_items(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn checked_items(&self) -> usize {
        self.all_items().filter(|i| i.checked).count()
    }
}
