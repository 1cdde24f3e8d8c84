pub mod categorizer;
pub mod generator;
pub mod mutator;
pub mod parser;
pub mod weekly;

pub use categorizer::categorize;
pub use generator::generate_shopping_list;
pub use mutator::{add_custom_item, clear_checked_items, remove_item, toggle_checked};
pub use parser::parse_ingredient;
