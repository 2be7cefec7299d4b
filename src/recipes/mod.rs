pub mod fallback;
pub mod ingredients;
pub mod model;
pub mod normalize;
pub mod parse;
pub mod prompt;
pub mod search;

// Re-export common types
pub use ingredients::{Ingredient, IngredientSelection, IngredientSource};
pub use model::{Difficulty, Nutrition, Recipe, RecipeIngredient};
pub use search::{RecipeSearch, SearchError, SearchState};
