use colored::Colorize;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::cooking::CookingMode;
use crate::database::Database;
use crate::notify::{ConsoleNotifier, Notifier};
use crate::providers::traits::CompletionProvider;
use crate::providers::{create_provider, provider_keys_from_env, PROVIDER_NAMES};
use crate::recipes::prompt::CHEF_SYSTEM_PROMPT;
use crate::recipes::{IngredientSelection, Recipe, RecipeSearch};

mod cooking_cmd;
mod pantry_cmd;
mod recipe_cmd;
mod system;

pub struct CommandHandler {
    provider: Box<dyn CompletionProvider + Send + Sync>,
    // Store API keys for different providers
    provider_keys: HashMap<String, String>,
    notifier: Arc<dyn Notifier>,
    search: RecipeSearch,
    selection: IngredientSelection,
    results: Vec<Recipe>,
    db: Arc<Database>,
    cooking: Option<CookingMode>,
    exiting: bool,
}

impl CommandHandler {
    pub fn new(
        provider: Box<dyn CompletionProvider + Send + Sync>,
        db: Arc<Database>,
        config: SearchConfig,
    ) -> Self {
        Self::with_notifier(provider, db, config, Arc::new(ConsoleNotifier))
    }

    pub fn with_notifier(
        provider: Box<dyn CompletionProvider + Send + Sync>,
        db: Arc<Database>,
        config: SearchConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            provider,
            provider_keys: provider_keys_from_env(),
            search: RecipeSearch::new(Arc::clone(&notifier), config),
            notifier,
            selection: IngredientSelection::new(),
            results: Vec::new(),
            db,
            cooking: None,
            exiting: false,
        }
    }

    /// True once `exit` has been entered.
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    pub fn is_cooking(&self) -> bool {
        self.cooking.is_some()
    }

    pub fn selection(&self) -> &IngredientSelection {
        &self.selection
    }

    pub fn results(&self) -> &[Recipe] {
        &self.results
    }

    pub async fn handle_command(&mut self, input: &str) -> Result<(), String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }

        let (command, rest) = recipe_cmd::split_command(input);

        // Step navigation takes precedence while cooking
        if let Some(mode) = self.cooking.as_mut() {
            if cooking_cmd::COOKING_COMMANDS.contains(&command.as_str()) {
                if cooking_cmd::handle_command(input, mode)? {
                    self.cooking = None;
                }
                return Ok(());
            }
        }

        match command.as_str() {
            "help" | "exit" | "quit" => {
                self.exiting = system::handle_command(&command)?;
                Ok(())
            }
            "providers" => self.list_providers().await,
            "use" => self.switch_provider(rest).await,
            "add" | "remove" | "clear" | "list" => {
                recipe_cmd::handle_selection_command(input, &mut self.selection)
            }
            "search" => self.handle_search(rest).await,
            "show" | "save" | "saved" | "unsave" => {
                recipe_cmd::handle_saved_command(input, &self.results, &self.db).await
            }
            "pantry" => pantry_cmd::handle_command(input, &self.db, &mut self.selection).await,
            "cook" => self.start_cooking(rest).await,
            _ if cooking_cmd::COOKING_COMMANDS.contains(&command.as_str()) => {
                Err("Not cooking right now. Use: cook <n>".to_string())
            }
            _ => Err(format!("Unknown command: {}. Type 'help' for available commands.", command)),
        }
    }

    async fn handle_search(&mut self, extra: &str) -> Result<(), String> {
        if !extra.is_empty() {
            self.selection.add_list(extra);
        }
        // Errors were already reported by the notifier
        recipe_cmd::search(&self.search, self.provider.as_ref(), &self.selection).await;
        self.results = self.search.latest_results().await;
        recipe_cmd::print_results(&self.results);
        Ok(())
    }

    async fn start_cooking(&mut self, arg: &str) -> Result<(), String> {
        let recipe = match arg.strip_prefix("saved") {
            Some(id) if !id.trim().is_empty() => {
                let id = id.trim();
                self.db.get_recipe(id)
                    .await
                    .map_err(|e| format!("Failed to load recipe: {}", e))?
                    .ok_or_else(|| format!("No saved recipe with id {}", id))?
            }
            Some(_) => return Err("Usage: cook saved <id>".to_string()),
            None => recipe_cmd::pick(&self.results, arg)?.clone(),
        };

        let mode = cooking_cmd::start(&recipe, Arc::clone(&self.notifier))?;
        info!("cooking mode started for {}", recipe.title);
        self.cooking = Some(mode);
        Ok(())
    }

    async fn list_providers(&self) -> Result<(), String> {
        let model = self.provider.get_model_info()
            .await
            .unwrap_or_else(|_| "unknown model".to_string());
        println!("\n🤖 Available AI Providers:");
        println!("  Currently using: {} ({})", self.provider.name().cyan(), model);
        println!("\n  Available providers:");

        for provider in PROVIDER_NAMES {
            let status = if self.provider_keys.contains_key(provider) {
                "✅ Ready".green()
            } else {
                "❌ No API key".red()
            };
            println!("  • {} - {}", provider, status);
        }

        println!("\nTo switch providers, use: use <provider>");
        println!("Example: use openai");

        Ok(())
    }

    async fn switch_provider(&mut self, provider_name: &str) -> Result<(), String> {
        let provider_name = provider_name.trim().to_lowercase();
        if provider_name.is_empty() {
            return Err("Usage: use <provider>".to_string());
        }

        // Get API key for the requested provider
        let api_key = self.provider_keys.get(&provider_name)
            .ok_or_else(|| format!("No API key found for {}. Set {}_API_KEY in your environment.",
                provider_name, provider_name.to_uppercase()))?
            .clone();

        self.provider = create_provider(&provider_name, api_key, CHEF_SYSTEM_PROMPT.to_string())
            .await
            .map_err(|e| e.to_string())?;
        println!("🔄 Switched to {} provider", self.provider.name().cyan());

        Ok(())
    }
}
