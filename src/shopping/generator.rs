use std::collections::HashMap;

use tracing::debug;

use crate::error::RecipeboxError;
use crate::ids::IdGenerator;
use crate::models::{Category, Recipe, ShoppingList, ShoppingListItem};
use crate::shopping::categorizer::categorize;
use crate::shopping::parser::parse_ingredient;

/// Leading number of `s` the way JavaScript's `parseFloat` reads it, or 0
/// when there is none. "1/2" reads as 1 and "1 1/2" as 1; fractions are not
/// evaluated. Exponents and `Infinity` are accepted so merged totals read
/// back as they were written.
pub fn leading_number(s: &str) -> f64 {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned.starts_with("Infinity") {
        return if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let bytes = s.as_bytes();
    let mut end = s.len() - unsigned.len();
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || end > int_start {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Prints a sum as JavaScript's `Number#toString` does: exponent form
/// outside [1e-6, 1e21), `Infinity` on overflow.
pub fn format_quantity(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let sci = format!("{n:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => sci,
        };
    }
    format!("{n}")
}

fn add_quantities(existing: &str, extra: &str) -> String {
    format_quantity(leading_number(existing) + leading_number(extra))
}

struct Entry {
    quantity: String,
    unit: String,
    item: String,
    original: String,
    category: Category,
}

/// Build a shopping list from the ingredients of the given recipes.
///
/// Lines whose parsed item text is identical are merged: quantities are
/// added when the new line has a quantity and the units match, otherwise
/// the new line is appended to `original`. Ids the lookup cannot resolve
/// are skipped; lookup errors propagate.
pub fn generate_shopping_list<F>(
    recipe_ids: &[String],
    mut lookup: F,
    ids: &dyn IdGenerator,
) -> Result<ShoppingList, RecipeboxError>
where
    F: FnMut(&str) -> Result<Option<Recipe>, RecipeboxError>,
{
    let mut entries: Vec<Entry> = Vec::new();
    let mut by_item: HashMap<String, usize> = HashMap::new();

    for recipe_id in recipe_ids {
        let Some(recipe) = lookup(recipe_id)? else {
            debug!(recipe_id = %recipe_id, "skipping unknown recipe");
            continue;
        };

        for line in &recipe.ingredients {
            let parsed = parse_ingredient(line);
            let category = categorize(&parsed.item);

            match by_item.get(&parsed.item) {
                Some(&idx) => {
                    let existing = &mut entries[idx];
                    if !parsed.quantity.is_empty() && existing.unit == parsed.unit {
                        existing.quantity = add_quantities(&existing.quantity, &parsed.quantity);
                        debug!(item = %existing.item, quantity = %existing.quantity, "merged quantities");
                    } else {
                        existing.original.push_str(", ");
                        existing.original.push_str(&parsed.original);
                    }
                }
                None => {
                    by_item.insert(parsed.item.clone(), entries.len());
                    entries.push(Entry {
                        quantity: parsed.quantity,
                        unit: parsed.unit,
                        item: parsed.item,
                        original: parsed.original,
                        category,
                    });
                }
            }
        }
    }

    let mut list = ShoppingList::empty();
    for entry in entries {
        let item = ShoppingListItem {
            id: ids.next_id(&entry.item),
            item: entry.item,
            quantity: entry.quantity,
            unit: entry.unit,
            original: entry.original,
            category: entry.category,
            checked: false,
        };
        list.0.entry(item.category).or_default().push(item);
    }
    Ok(list)
}
