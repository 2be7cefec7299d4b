pub mod api;
pub mod commands;
pub mod config;
pub mod cooking;
pub mod database;
pub mod notify;
pub mod providers;
pub mod recipes;

// Re-export commonly used items
pub use config::SearchConfig;
pub use cooking::{CookingMode, CookingSession};
pub use database::Database;
pub use recipes::{Recipe, RecipeSearch};
