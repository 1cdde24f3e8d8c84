use crate::models::Category;

/// Keyword table, scanned top to bottom. The first category with a keyword
/// contained in the item wins, so the order here decides ties
/// ("pepper" is Produce, "chicken stock" is Meat & Seafood).
const KEYWORDS: [(Category, &[&str]); 6] = [
    (
        Category::Produce,
        &[
            "lettuce", "tomato", "onion", "garlic", "potato", "carrot", "celery", "pepper",
            "cucumber", "spinach", "broccoli", "apple", "banana", "orange", "lemon", "lime",
            "berry", "fruit", "vegetable",
        ],
    ),
    (
        Category::DairyEggs,
        &["milk", "cream", "cheese", "butter", "yogurt", "egg", "sour cream", "cottage cheese"],
    ),
    (
        Category::MeatSeafood,
        &[
            "chicken", "beef", "pork", "turkey", "fish", "salmon", "tuna", "shrimp", "bacon",
            "sausage", "ham",
        ],
    ),
    (
        Category::Pantry,
        &[
            "flour", "sugar", "salt", "pepper", "oil", "vinegar", "rice", "pasta", "beans",
            "sauce", "spice", "herb", "stock", "broth", "can", "baking",
        ],
    ),
    (Category::Frozen, &["frozen", "ice cream"]),
    (Category::Bakery, &["bread", "bun", "roll", "tortilla", "pita"]),
];

pub fn categorize(item: &str) -> Category {
    let lower = item.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map_or(Category::Other, |(category, _)| *category)
}
