use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::cooking::timer::{strip_timer_markers, timer_minutes};
use crate::database::Database;
use crate::providers::traits::CompletionProvider;
use crate::recipes::{IngredientSelection, IngredientSource, Recipe, RecipeSearch};

pub fn handle_selection_command(input: &str, selection: &mut IngredientSelection) -> Result<(), String> {
    let (command, rest) = split_command(input);

    match command.as_str() {
        "add" => {
            if rest.is_empty() {
                return Err("Usage: add <ingredient>[, <ingredient> ...]".to_string());
            }
            let added = selection.add_list(rest);
            println!("➕ Added {} ingredient(s). {} selected.", added, selection.len());
            Ok(())
        }
        "remove" => {
            if rest.is_empty() {
                return Err("Usage: remove <ingredient>".to_string());
            }
            if selection.remove(rest) {
                println!("➖ Removed {}", rest.cyan());
                Ok(())
            } else {
                Err(format!("{} is not in the selection", rest))
            }
        }
        "clear" => {
            selection.clear();
            println!("🧹 Selection cleared");
            Ok(())
        }
        "list" => {
            print_selection(selection);
            Ok(())
        }
        _ => Err(format!("Unknown ingredient command: {}", command)),
    }
}

fn print_selection(selection: &IngredientSelection) {
    if selection.is_empty() {
        println!("No ingredients selected. Use: add chicken, rice");
        return;
    }
    println!("\n🥕 Selected ingredients:");
    for item in selection.items() {
        let origin = match item.source {
            IngredientSource::Manual => "".normal(),
            IngredientSource::Pantry => " (pantry)".dimmed(),
        };
        println!("  • {}{}", item.name.cyan(), origin);
    }
    println!();
}

/// Runs one search behind a spinner. The outcome lands in
/// `RecipeSearch::latest_results`.
pub async fn search(
    search: &RecipeSearch,
    provider: &(dyn CompletionProvider + Send + Sync),
    selection: &IngredientSelection,
) {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!("Asking {} for recipes...", provider.name()));

    search.search(provider, &selection.names()).await;
    pb.finish_and_clear();
}

pub fn print_results(recipes: &[Recipe]) {
    for (i, recipe) in recipes.iter().enumerate() {
        print_summary(i + 1, recipe);
    }
    if !recipes.is_empty() {
        println!("\nUse {} to see a recipe, {} to start cooking.", "show <n>".cyan(), "cook <n>".cyan());
    }
}

pub async fn handle_saved_command(input: &str, results: &[Recipe], db: &Database) -> Result<(), String> {
    let (command, rest) = split_command(input);

    match command.as_str() {
        "show" => {
            let recipe = pick(results, rest)?;
            print_card(recipe);
            Ok(())
        }
        "save" => {
            let recipe = pick(results, rest)?;
            db.save_recipe(recipe)
                .await
                .map_err(|e| format!("Failed to save recipe: {}", e))?;
            println!("💾 Saved {} ({})", recipe.title.cyan(), recipe.id.dimmed());
            Ok(())
        }
        "saved" => {
            let saved = db.list_recipes(50)
                .await
                .map_err(|e| format!("Failed to load saved recipes: {}", e))?;
            if saved.is_empty() {
                println!("No saved recipes yet.");
            }
            for recipe in &saved {
                println!("  • {} {} ({} min)", recipe.id.dimmed(), recipe.title.cyan(), recipe.total_time());
            }
            Ok(())
        }
        "unsave" => {
            if rest.is_empty() {
                return Err("Usage: unsave <id>".to_string());
            }
            let removed = db.delete_recipe(rest)
                .await
                .map_err(|e| format!("Failed to delete recipe: {}", e))?;
            if removed {
                println!("🗑️ Deleted {}", rest);
                Ok(())
            } else {
                Err(format!("No saved recipe with id {}", rest))
            }
        }
        _ => Err(format!("Unknown recipe command: {}", command)),
    }
}

/// Resolves a 1-based result number.
pub fn pick<'a>(results: &'a [Recipe], arg: &str) -> Result<&'a Recipe, String> {
    if results.is_empty() {
        return Err("No recipes yet. Run a search first.".to_string());
    }
    let n: usize = arg
        .trim()
        .parse()
        .map_err(|_| format!("Expected a recipe number between 1 and {}", results.len()))?;
    n.checked_sub(1)
        .and_then(|i| results.get(i))
        .ok_or_else(|| format!("Expected a recipe number between 1 and {}", results.len()))
}

fn print_summary(n: usize, recipe: &Recipe) {
    println!(
        "\n{}. {} {}",
        n,
        recipe.title.bold().truecolor(255, 236, 179),
        format!("[{} · {} · {} min · {} kcal]",
            recipe.cuisine_type, recipe.difficulty, recipe.total_time(), recipe.calories).dimmed()
    );
    if !recipe.description.is_empty() {
        println!("   {}", recipe.description);
    }
}

fn print_card(recipe: &Recipe) {
    println!("\n🍽️  {}", recipe.title.bold().truecolor(255, 236, 179));
    if !recipe.description.is_empty() {
        println!("{}", recipe.description);
    }
    println!(
        "⏱️ Prep {} min | Cook {} min | 👥 {} servings | 🔥 {} kcal | {}",
        recipe.prep_time.to_string().cyan(),
        recipe.cook_time.to_string().cyan(),
        recipe.servings.to_string().cyan(),
        recipe.calories.to_string().cyan(),
        recipe.difficulty
    );

    println!("\n📝 Ingredients:");
    for ingredient in &recipe.ingredients {
        println!("  • {} {} {}", ingredient.amount, ingredient.unit, ingredient.name.cyan());
    }

    println!("\n👩‍🍳 Instructions:");
    for (i, step) in recipe.instructions.iter().enumerate() {
        let timer = timer_minutes(step)
            .map(|m| format!(" ⏲ {} min", m).yellow().to_string())
            .unwrap_or_default();
        println!("  {}. {}{}", i + 1, strip_timer_markers(step), timer);
    }

    if let Some(n) = &recipe.nutrition {
        println!("\n📊 Protein {}g | Carbs {}g | Fat {}g", n.protein, n.carbs, n.fat);
    }
    if !recipe.tags.is_empty() {
        println!("🏷️ {}", recipe.tags.join(", ").dimmed());
    }
    println!();
}

pub(super) fn split_command(input: &str) -> (String, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (input.to_lowercase(), ""),
    }
}
