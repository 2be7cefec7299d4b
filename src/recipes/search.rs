use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::SearchConfig;
use crate::notify::{Notification, Notifier};
use crate::providers::traits::CompletionProvider;

use super::fallback::fallback_recipe;
use super::model::Recipe;
use super::normalize::normalize_recipes;
use super::parse::extract_recipe_array;
use super::prompt::recipe_search_request;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Please add at least one ingredient")]
    NoIngredients,
    #[error("Recipe service failed: {0}")]
    Remote(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
    Results(usize),
    Empty,
    Error,
}

/// Turns a list of ingredients into a handful of recipes.
pub struct RecipeSearch {
    notifier: Arc<dyn Notifier>,
    config: SearchConfig,
    next_request: AtomicU64,
    state: RwLock<SearchState>,
    latest: RwLock<Vec<Recipe>>,
}

impl RecipeSearch {
    pub fn new(notifier: Arc<dyn Notifier>, config: SearchConfig) -> Self {
        Self {
            notifier,
            config,
            next_request: AtomicU64::new(0),
            state: RwLock::new(SearchState::Idle),
            latest: RwLock::new(Vec::new()),
        }
    }

    pub async fn state(&self) -> SearchState {
        *self.state.read().await
    }

    /// Results of the most recently started search that has finished.
    pub async fn latest_results(&self) -> Vec<Recipe> {
        self.latest.read().await.clone()
    }

    /// Never fails: errors are reported through the notifier and yield an
    /// empty list.
    pub async fn search(
        &self,
        provider: &(dyn CompletionProvider + Send + Sync),
        ingredients: &[String],
    ) -> Vec<Recipe> {
        let request_id = self.next_request.fetch_add(1, Ordering::SeqCst) + 1;

        let outcome = self.run(request_id, provider, ingredients).await;
        let (state, recipes) = match outcome {
            Ok(recipes) if recipes.is_empty() => {
                self.notifier.notify(Notification::warning(
                    "No recipes found",
                    "Try different ingredients",
                ));
                (SearchState::Empty, recipes)
            }
            Ok(recipes) => {
                self.notifier.notify(Notification::success(
                    format!("Found {} recipes", recipes.len()),
                    "",
                ));
                (SearchState::Results(recipes.len()), recipes)
            }
            Err(SearchError::NoIngredients) => {
                self.notifier.notify(Notification::error(
                    "Missing ingredients",
                    SearchError::NoIngredients.to_string(),
                ));
                (SearchState::Error, Vec::new())
            }
            Err(SearchError::Remote(e)) => {
                warn!("recipe search failed: {:#}", e);
                self.notifier.notify(Notification::error("Search failed", e.to_string()));
                (SearchState::Error, Vec::new())
            }
        };

        self.publish(request_id, state, &recipes).await;
        recipes
    }

    /// The raw flow: validation, one provider call, parsing with fallback.
    async fn run(
        &self,
        request_id: u64,
        provider: &(dyn CompletionProvider + Send + Sync),
        ingredients: &[String],
    ) -> Result<Vec<Recipe>, SearchError> {
        let names = clean_names(ingredients);
        if names.is_empty() {
            return Err(SearchError::NoIngredients);
        }

        self.mark_searching(request_id).await;
        info!("searching recipes for {} ingredients via {}", names.len(), provider.name());

        let request = recipe_search_request(&names, self.config.recipe_count);
        let reply = provider.complete_with_context(&request).await?;

        Ok(recipes_from_reply(&reply.response, &names))
    }

    fn is_latest(&self, request_id: u64) -> bool {
        self.next_request.load(Ordering::SeqCst) == request_id
    }

    async fn mark_searching(&self, request_id: u64) {
        let mut state = self.state.write().await;
        if self.is_latest(request_id) {
            *state = SearchState::Searching;
        }
    }

    async fn publish(&self, request_id: u64, state: SearchState, recipes: &[Recipe]) {
        // A search started later has already been issued; leave its state alone.
        let mut current = self.state.write().await;
        if !self.is_latest(request_id) {
            debug!("discarding stale results of search #{}", request_id);
            return;
        }
        *current = state;
        *self.latest.write().await = recipes.to_vec();
    }
}

/// Parses a reply, substituting the fallback recipe when it is unreadable.
pub fn recipes_from_reply(reply: &str, ingredients: &[String]) -> Vec<Recipe> {
    match extract_recipe_array(reply) {
        Ok(raw) => normalize_recipes(&raw),
        Err(e) => {
            warn!("could not parse recipe reply ({}); using fallback recipe", e);
            vec![fallback_recipe(ingredients)]
        }
    }
}

fn clean_names(ingredients: &[String]) -> Vec<String> {
    ingredients
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
