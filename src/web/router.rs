//! Router configuration for the web API.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_recipe, delete_message, delete_recipe, delete_recipes_by_ingredient, get_recipe,
    heartbeat, join, list_messages, list_participants, list_recipes, post_message,
    update_message, update_recipe, update_recipes_by_ingredient, AppState,
};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let chat_routes = Router::new()
        .route("/participants", post(join).get(list_participants))
        .route("/messages", post(post_message).get(list_messages))
        .route("/messages/:id", delete(delete_message).put(update_message))
        .route("/status", post(heartbeat));

    let recipe_routes = Router::new()
        .route("/receitas", get(list_recipes).post(create_recipe))
        .route(
            "/receitas/:id",
            get(get_recipe).delete(delete_recipe).put(update_recipe),
        )
        .route(
            "/receitas/muitas/:filtroIngredientes",
            delete(delete_recipes_by_ingredient).put(update_recipes_by_ingredient),
        );

    Router::new()
        .merge(chat_routes)
        .merge(recipe_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}
