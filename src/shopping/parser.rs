//! Best-effort split of an ingredient line into quantity, unit and item.
//!
//! The parser never fails: anything it cannot recognise stays in `item`.

use crate::models::ParsedIngredient;

/// Recognised unit words, matched case-insensitively and only when
/// followed by whitespace.
pub const UNITS: [&str; 16] = [
    "cup", "cups", "tbsp", "tsp", "tablespoon", "teaspoon", "oz", "ounce", "lb", "pound", "g",
    "gram", "kg", "ml", "l", "liter",
];

fn is_quantity_char(c: char) -> bool {
    c.is_ascii_digit() || c == '/' || c == '.' || c.is_whitespace()
}

/// Length of the unit word at the start of `rest`, if it is followed by
/// whitespace.
fn leading_unit(rest: &str) -> Option<usize> {
    UNITS.iter().map(|u| u.len()).find(|&len| {
        let Some(candidate) = rest.get(..len) else {
            return false;
        };
        let followed_by_space = rest[len..].chars().next().is_some_and(char::is_whitespace);
        followed_by_space && UNITS.iter().any(|u| u.eq_ignore_ascii_case(candidate))
    })
}

pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    let trimmed = line.trim();
    let run_len = trimmed
        .char_indices()
        .find(|(_, c)| !is_quantity_char(*c))
        .map_or(trimmed.len(), |(i, _)| i);

    if run_len == 0 {
        return ParsedIngredient {
            quantity: String::new(),
            unit: String::new(),
            item: trimmed.to_owned(),
            original: line.to_owned(),
        };
    }

    let quantity = trimmed[..run_len].trim().to_owned();
    let rest = trimmed[run_len..].trim();
    let (unit, item) = match leading_unit(rest) {
        Some(len) => (rest[..len].to_owned(), rest[len..].trim().to_owned()),
        None => (String::new(), rest.to_owned()),
    };

    ParsedIngredient {
        quantity,
        unit,
        item,
        original: line.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(line: &str) -> (String, String, String) {
        let p = parse_ingredient(line);
        (p.quantity, p.unit, p.item)
    }

    fn owned(q: &str, u: &str, i: &str) -> (String, String, String) {
        (q.into(), u.into(), i.into())
    }

    #[test]
    fn quantity_unit_and_item() {
        assert_eq!(parts("2 cups flour"), owned("2", "cups", "flour"));
        assert_eq!(parts("1 tsp baking soda"), owned("1", "tsp", "baking soda"));
        assert_eq!(parts("1 lb ground beef"), owned("1", "lb", "ground beef"));
    }

    #[test]
    fn text_only_line_has_no_quantity() {
        assert_eq!(parts("salt to taste"), owned("", "", "salt to taste"));
        assert_eq!(parts("Salt and pepper to taste"), owned("", "", "Salt and pepper to taste"));
    }

    #[test]
    fn empty_line_is_all_empty() {
        let p = parse_ingredient("");
        assert_eq!(p, ParsedIngredient::default());
    }

    #[test]
    fn fractions_and_mixed_numbers_stay_textual() {
        assert_eq!(parts("3/4 cup brown sugar"), owned("3/4", "cup", "brown sugar"));
        assert_eq!(parts("1 1/2 cups milk"), owned("1 1/2", "cups", "milk"));
        assert_eq!(parts("0.5 kg potatoes"), owned("0.5", "kg", "potatoes"));
    }

    #[test]
    fn quantity_without_unit() {
        assert_eq!(parts("2 large eggs"), owned("2", "", "large eggs"));
        assert_eq!(parts("1 onion, diced"), owned("1", "", "onion, diced"));
    }

    #[test]
    fn unit_matches_case_insensitively_and_keeps_its_spelling() {
        assert_eq!(parts("2 Tbsp butter"), owned("2", "Tbsp", "butter"));
        assert_eq!(parts("500 G pasta"), owned("500", "G", "pasta"));
    }

    #[test]
    fn unit_requires_following_whitespace() {
        // "gallons" starts with "g" but is not a unit token
        assert_eq!(parts("2 gallons milk"), owned("2", "", "gallons milk"));
        assert_eq!(parts("1/2 cup"), owned("1/2", "", "cup"));
        assert_eq!(parts("2 lbs beef"), owned("2", "", "lbs beef"));
    }

    #[test]
    fn unit_glued_to_quantity_still_parses() {
        assert_eq!(parts("250ml cream"), owned("250", "ml", "cream"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored_but_original_kept() {
        let p = parse_ingredient("  2 cups   flour  ");
        assert_eq!((p.quantity.as_str(), p.unit.as_str(), p.item.as_str()), ("2", "cups", "flour"));
        assert_eq!(p.original, "  2 cups   flour  ");
    }

    #[test]
    fn number_only_line_has_empty_item() {
        assert_eq!(parts("12"), owned("12", "", ""));
    }

    #[test]
    fn non_ascii_text_does_not_panic() {
        assert_eq!(parts("2 crème fraîche"), owned("2", "", "crème fraîche"));
        assert_eq!(parts("½ cup sugar"), owned("", "", "½ cup sugar"));
        assert_eq!(parts("1 l\u{e9}gume"), owned("1", "", "l\u{e9}gume"));
    }
}
