pub mod feedback;
pub mod meal_plan;
pub mod recipe;
pub mod shopping;
pub mod user;

pub use feedback::*;
pub use meal_plan::{DayMeals, MealPlan, MealSlot};
pub use recipe::*;
pub use shopping::*;
pub use user::*;
