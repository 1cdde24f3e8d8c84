//! Edits to a shopping list. Each function returns a new list and leaves
//! the input untouched; unknown ids are ignored.

use crate::ids::IdGenerator;
use crate::models::{Category, ShoppingList, ShoppingListItem};
use crate::shopping::parser::parse_ingredient;

pub fn toggle_checked(list: &ShoppingList, item_id: &str) -> ShoppingList {
    let mut updated = list.clone();
    if let Some(item) = updated
        .0
        .values_mut()
        .flat_map(|items| items.iter_mut())
        .find(|i| i.id == item_id)
    {
        item.checked = !item.checked;
    }
    updated
}

/// Parse `text` and append it to `category`. The category is taken as
/// given, never inferred from the text.
pub fn add_custom_item(
    list: &ShoppingList,
    text: &str,
    category: Category,
    ids: &dyn IdGenerator,
) -> ShoppingList {
    let parsed = parse_ingredient(text);
    let mut updated = list.clone();
    updated.0.entry(category).or_default().push(ShoppingListItem {
        id: ids.next_id("custom"),
        item: parsed.item,
        quantity: parsed.quantity,
        unit: parsed.unit,
        original: parsed.original,
        category,
        checked: false,
    });
    updated
}

pub fn remove_item(list: &ShoppingList, item_id: &str) -> ShoppingList {
    let mut updated = list.clone();
    for items in updated.0.values_mut() {
        items.retain(|i| i.id != item_id);
    }
    updated
}

pub fn clear_checked_items(list: &ShoppingList) -> ShoppingList {
    let mut updated = list.clone();
    for items in updated.0.values_mut() {
        items.retain(|i| !i.checked);
    }
    updated
}
