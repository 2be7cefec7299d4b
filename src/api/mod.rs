use axum::{
    routing::{get, post},
    Router,
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use validator::Validate;

use crate::config::SearchConfig;
use crate::database::{Database, DatabaseError, PantryItem};
use crate::notify::{CollectingNotifier, LogNotifier, Notification, Notifier};
use crate::providers::traits::CompletionProvider;
use crate::recipes::{Recipe, RecipeSearch};

const MAX_CONCURRENT_REQUESTS: usize = 64;
const SAVED_RECIPES_LIMIT: usize = 100;
const MAX_INGREDIENTS: usize = 50;

#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn CompletionProvider + Send + Sync>,
    db: Arc<Database>,
    config: SearchConfig,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[validate(length(max = 50))]
    ingredients: Vec<String>,
    /// Also search with everything in the pantry.
    #[serde(default)]
    include_pantry: bool,
}

#[derive(Serialize)]
pub struct SearchResponse {
    recipes: Vec<Recipe>,
    notifications: Vec<Notification>,
}

#[derive(Deserialize, Validate)]
pub struct PantryRequest {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[validate(range(min = 0.0))]
    #[serde(default = "default_quantity")]
    quantity: f64,
    #[validate(length(max = 30))]
    #[serde(default)]
    unit: String,
}

#[derive(Deserialize, Validate)]
pub struct QuantityRequest {
    #[validate(range(min = 0.0))]
    quantity: f64,
}

fn default_quantity() -> f64 {
    1.0
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse {
    pub status: String,
}

type ApiError = (StatusCode, Json<ApiResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(code: StatusCode, status: impl Into<String>) -> ApiError {
    (code, Json(ApiResponse { status: status.into() }))
}

fn database_error(e: DatabaseError) -> ApiError {
    match e {
        DatabaseError::NotFound(what) => api_error(StatusCode::NOT_FOUND, format!("Not found: {}", what)),
        DatabaseError::Invalid(why) => api_error(StatusCode::BAD_REQUEST, why),
        other => {
            error!("Database error: {}", other);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

fn validation_error(e: validator::ValidationErrors) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, format!("Invalid request: {}", e))
}

/// Create and configure the API router
pub fn create_api(
    provider: Box<dyn CompletionProvider + Send + Sync>,
    db: Arc<Database>,
    config: SearchConfig,
) -> Router {
    info!("Setting up API routes using {}", provider.name());

    let state = AppState {
        provider: Arc::from(provider),
        db,
        config,
    };

    // Fully permissive CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health_check))
        .route("/recipes/search", post(search_handler))
        .route("/recipes/saved", get(list_saved_handler).post(save_handler))
        .route("/recipes/saved/:id", get(get_saved_handler).delete(delete_saved_handler))
        .route("/pantry", get(list_pantry_handler).post(add_pantry_handler))
        .route("/pantry/:id", axum::routing::patch(update_pantry_handler).delete(remove_pantry_handler))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<ApiResponse> {
    Json(ApiResponse {
        status: "Server is running and healthy".to_string()
    })
}

async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<SearchResponse> {
    request.validate().map_err(validation_error)?;

    let mut ingredients = request.ingredients;
    if request.include_pantry {
        let pantry = state.db.pantry_names().await.map_err(database_error)?;
        for name in pantry {
            if !ingredients.iter().any(|i| i.trim().eq_ignore_ascii_case(&name)) {
                ingredients.push(name);
            }
        }
        if ingredients.len() > MAX_INGREDIENTS {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                format!("Too many ingredients with the pantry included (max {})", MAX_INGREDIENTS),
            ));
        }
    }

    // Each request gets its own orchestrator so notifications stay with it
    let notifier = Arc::new(CollectingNotifier::new());
    let search = RecipeSearch::new(notifier.clone(), state.config.clone());
    let recipes = search.search(state.provider.as_ref(), &ingredients).await;

    let notifications = notifier.take();
    for notification in &notifications {
        LogNotifier.notify(notification.clone());
    }

    Ok(Json(SearchResponse {
        recipes,
        notifications,
    }))
}

async fn list_saved_handler(State(state): State<AppState>) -> ApiResult<Vec<Recipe>> {
    let recipes = state.db.list_recipes(SAVED_RECIPES_LIMIT).await.map_err(database_error)?;
    Ok(Json(recipes))
}

async fn save_handler(
    State(state): State<AppState>,
    Json(recipe): Json<Recipe>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    if recipe.title.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Recipe title is required"));
    }
    state.db.save_recipe(&recipe).await.map_err(database_error)?;
    info!("Saved recipe {} ({})", recipe.title, recipe.id);
    Ok((StatusCode::CREATED, Json(recipe)))
}

async fn get_saved_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Recipe> {
    state.db.get_recipe(&id)
        .await
        .map_err(database_error)?
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("No saved recipe with id {}", id)))
}

async fn delete_saved_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.db.delete_recipe(&id).await.map_err(database_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(StatusCode::NOT_FOUND, format!("No saved recipe with id {}", id)))
    }
}

async fn list_pantry_handler(State(state): State<AppState>) -> ApiResult<Vec<PantryItem>> {
    let items = state.db.list_pantry_items().await.map_err(database_error)?;
    Ok(Json(items))
}

async fn add_pantry_handler(
    State(state): State<AppState>,
    Json(request): Json<PantryRequest>,
) -> Result<(StatusCode, Json<PantryItem>), ApiError> {
    request.validate().map_err(validation_error)?;
    let item = state.db
        .add_pantry_item(&request.name, request.quantity, &request.unit)
        .await
        .map_err(database_error)?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_pantry_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<QuantityRequest>,
) -> ApiResult<PantryItem> {
    request.validate().map_err(validation_error)?;
    let item = state.db
        .update_pantry_quantity(id, request.quantity)
        .await
        .map_err(database_error)?;
    Ok(Json(item))
}

async fn remove_pantry_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.db.remove_pantry_item(id).await.map_err(database_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(StatusCode::NOT_FOUND, format!("No pantry item with id {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::scripted::ScriptedProvider;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app_with(provider: ScriptedProvider) -> (Router, Arc<Database>) {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let app = create_api(Box::new(provider), Arc::clone(&db), SearchConfig::default());
        (app, db)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app_with(ScriptedProvider::default()).await;
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "Server is running and healthy");
    }

    #[tokio::test]
    async fn test_search_returns_recipes_and_notifications() {
        let provider = ScriptedProvider::replying(&[r#"[{"title": "Shakshuka", "prepTime": "10 minutes"}]"#]);
        let (app, _) = app_with(provider.clone()).await;

        let response = send(&app, Method::POST, "/recipes/search", Some(json!({"ingredients": ["eggs", "tomato"]}))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["recipes"][0]["title"], "Shakshuka");
        assert_eq!(body["recipes"][0]["prepTime"], 10);
        assert_eq!(body["notifications"][0]["level"], "success");
        assert_eq!(body["notifications"][0]["title"], "Found 1 recipes");
        assert_eq!(provider.requests()[0].context.selected_ingredients, vec!["eggs", "tomato"]);
    }

    #[tokio::test]
    async fn test_search_with_unreadable_reply_uses_fallback() {
        let (app, _) = app_with(ScriptedProvider::replying(&["Sorry, I can't help"])).await;

        let response = send(&app, Method::POST, "/recipes/search", Some(json!({"ingredients": ["chicken", "rice"]}))).await;
        let body = json_body(response).await;
        assert_eq!(body["recipes"].as_array().unwrap().len(), 1);
        assert_eq!(body["recipes"][0]["title"], "Creative Recipe with chicken & rice");
    }

    #[tokio::test]
    async fn test_search_failure_is_reported_not_fatal() {
        let (app, _) = app_with(ScriptedProvider::failing("upstream timeout")).await;

        let response = send(&app, Method::POST, "/recipes/search", Some(json!({"ingredients": ["lentils"]}))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["recipes"].as_array().unwrap().is_empty());
        assert_eq!(body["notifications"][0]["title"], "Search failed");
        assert_eq!(body["notifications"][0]["message"], "upstream timeout");
    }

    #[tokio::test]
    async fn test_search_includes_pantry() {
        let provider = ScriptedProvider::replying(&["[]"]);
        let (app, db) = app_with(provider.clone()).await;
        db.add_pantry_item("Rice", 1.0, "kg").await.unwrap();
        db.add_pantry_item("onion", 2.0, "").await.unwrap();

        let response = send(
            &app,
            Method::POST,
            "/recipes/search",
            Some(json!({"ingredients": ["rice"], "includePantry": true})),
        )
        .await;
        assert_eq!(json_body(response).await["notifications"][0]["title"], "No recipes found");
        assert_eq!(provider.requests()[0].context.selected_ingredients, vec!["rice", "onion"]);
    }

    #[tokio::test]
    async fn test_too_many_ingredients_rejected() {
        let provider = ScriptedProvider::replying(&["[]"]);
        let (app, _) = app_with(provider.clone()).await;
        let many: Vec<String> = (0..51).map(|i| format!("item{}", i)).collect();

        let response = send(&app, Method::POST, "/recipes/search", Some(json!({"ingredients": many}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_pantry_merge_respects_ingredient_limit() {
        let provider = ScriptedProvider::replying(&["[]"]);
        let (app, db) = app_with(provider.clone()).await;
        for i in 0..60 {
            db.add_pantry_item(&format!("spice {}", i), 1.0, "jar").await.unwrap();
        }

        let response = send(
            &app,
            Method::POST,
            "/recipes/search",
            Some(json!({"ingredients": ["rice"], "includePantry": true})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_saved_recipe_lifecycle() {
        let (app, _) = app_with(ScriptedProvider::default()).await;
        let recipe = crate::recipes::fallback::fallback_recipe(&["okra".to_string()]);
        let id = recipe.id.clone();

        let response = send(&app, Method::POST, "/recipes/saved", Some(serde_json::to_value(&recipe).unwrap())).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(&app, Method::GET, "/recipes/saved", None).await;
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);

        let response = send(&app, Method::GET, &format!("/recipes/saved/{}", id), None).await;
        assert_eq!(json_body(response).await["title"], "Creative Recipe with okra");

        let response = send(&app, Method::DELETE, &format!("/recipes/saved/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::GET, &format!("/recipes/saved/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_pantry_endpoints() {
        let (app, _) = app_with(ScriptedProvider::default()).await;

        let response = send(&app, Method::POST, "/pantry", Some(json!({"name": "Flour", "quantity": 2.5, "unit": "kg"}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = json_body(response).await["id"].as_i64().unwrap();

        let response = send(&app, Method::POST, "/pantry", Some(json!({"name": ""}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, Method::PATCH, &format!("/pantry/{}", id), Some(json!({"quantity": 1.0}))).await;
        assert_eq!(json_body(response).await["quantity"], 1.0);

        let response = send(&app, Method::PATCH, "/pantry/999", Some(json!({"quantity": 1.0}))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::GET, "/pantry", None).await;
        assert_eq!(json_body(response).await[0]["name"], "Flour");

        let response = send(&app, Method::DELETE, &format!("/pantry/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, Method::DELETE, &format!("/pantry/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
