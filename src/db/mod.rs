pub mod connection;
pub mod feedback_repo;
pub mod kv;
pub mod meal_plan_repo;
pub mod memory;
pub mod migrations;
pub mod recipe_repo;
pub mod seed;
pub mod shopping_repo;
pub mod user_repo;

pub use connection::*;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
