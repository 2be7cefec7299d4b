pub mod database;
pub mod pantry;
pub mod saved_recipes;

pub use database::Database;
pub use database::DatabaseError;
pub use pantry::PantryItem;
