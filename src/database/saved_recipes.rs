use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::recipes::{Difficulty, Recipe};

use super::database::{Database, DatabaseError};
use super::pantry::parse_timestamp;

// JSON-encoded list columns are kept as text.
struct RecipeRow {
    id: String,
    title: String,
    description: String,
    prep_time: u32,
    cook_time: u32,
    servings: u32,
    difficulty: String,
    calories: u32,
    cuisine_type: String,
    ingredients: String,
    instructions: String,
    tags: String,
    nutrition: Option<String>,
    created_at: String,
}

const RECIPE_COLUMNS: &str = "id, title, description, prep_time, cook_time, servings, difficulty, \
     calories, cuisine_type, ingredients, instructions, tags, nutrition, created_at";

fn read_row(row: &Row<'_>) -> rusqlite::Result<RecipeRow> {
    Ok(RecipeRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        prep_time: row.get(3)?,
        cook_time: row.get(4)?,
        servings: row.get(5)?,
        difficulty: row.get(6)?,
        calories: row.get(7)?,
        cuisine_type: row.get(8)?,
        ingredients: row.get(9)?,
        instructions: row.get(10)?,
        tags: row.get(11)?,
        nutrition: row.get(12)?,
        created_at: row.get(13)?,
    })
}

fn decode<T: serde::de::DeserializeOwned>(column: &str, value: &str) -> Result<T, DatabaseError> {
    serde_json::from_str(value).map_err(|e| DatabaseError::Decode(format!("{}: {}", column, e)))
}

fn encode<T: serde::Serialize>(column: &str, value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::Invalid(format!("{}: {}", column, e)))
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = DatabaseError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            servings: row.servings,
            difficulty: Difficulty::parse_lenient(&row.difficulty),
            calories: row.calories,
            cuisine_type: row.cuisine_type,
            ingredients: decode("ingredients", &row.ingredients)?,
            instructions: decode("instructions", &row.instructions)?,
            tags: decode("tags", &row.tags)?,
            nutrition: row
                .nutrition
                .as_deref()
                .map(|n| decode("nutrition", n))
                .transpose()?,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

impl Database {
    /// Inserts the recipe, or overwrites the saved copy with the same id.
    pub async fn save_recipe(&self, recipe: &Recipe) -> Result<(), DatabaseError> {
        let id = recipe.id.clone();
        let title = recipe.title.clone();
        let description = recipe.description.clone();
        let (prep_time, cook_time, servings, calories) =
            (recipe.prep_time, recipe.cook_time, recipe.servings, recipe.calories);
        let difficulty = recipe.difficulty.to_string();
        let cuisine_type = recipe.cuisine_type.clone();
        let ingredients = encode("ingredients", &recipe.ingredients)?;
        let instructions = encode("instructions", &recipe.instructions)?;
        let tags = encode("tags", &recipe.tags)?;
        let nutrition = recipe
            .nutrition
            .as_ref()
            .map(|n| encode("nutrition", n))
            .transpose()?;
        let created_at = recipe.created_at.to_rfc3339();
        let updated_at = Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO recipes (id, title, description, prep_time, cook_time, servings,
                        difficulty, calories, cuisine_type, ingredients, instructions, tags,
                        nutrition, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
                     ON CONFLICT(id) DO UPDATE SET
                        title = excluded.title,
                        description = excluded.description,
                        prep_time = excluded.prep_time,
                        cook_time = excluded.cook_time,
                        servings = excluded.servings,
                        difficulty = excluded.difficulty,
                        calories = excluded.calories,
                        cuisine_type = excluded.cuisine_type,
                        ingredients = excluded.ingredients,
                        instructions = excluded.instructions,
                        tags = excluded.tags,
                        nutrition = excluded.nutrition,
                        updated_at = excluded.updated_at",
                    params![
                        id,
                        title,
                        description,
                        prep_time,
                        cook_time,
                        servings,
                        difficulty,
                        calories,
                        cuisine_type,
                        ingredients,
                        instructions,
                        tags,
                        nutrition,
                        created_at,
                        updated_at
                    ],
                )?;
                Ok(())
            })
            .await?;

        Ok(())
    }

    /// Most recently saved first.
    pub async fn list_recipes(&self, limit: usize) -> Result<Vec<Recipe>, DatabaseError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM recipes ORDER BY updated_at DESC, title LIMIT ?1",
                    RECIPE_COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![limit], read_row)?
                    .collect::<Result<Vec<_>, rusqlite::Error>>()?;
                Ok(rows)
            })
            .await?;

        rows.into_iter().map(Recipe::try_from).collect()
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>, DatabaseError> {
        let id = id.to_string();
        let row = self.conn
            .call(move |conn| {
                let row = conn
                    .query_row(
                        &format!("SELECT {} FROM recipes WHERE id = ?1", RECIPE_COLUMNS),
                        params![id],
                        read_row,
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;

        row.map(Recipe::try_from).transpose()
    }

    pub async fn delete_recipe(&self, id: &str) -> Result<bool, DatabaseError> {
        let id = id.to_string();
        let removed = self.conn
            .call(move |conn| {
                let removed = conn.execute("DELETE FROM recipes WHERE id = ?1", params![id])?;
                Ok(removed)
            })
            .await?;
        Ok(removed > 0)
    }
}
