//! Recipe catalog handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

use crate::recipes::{RecipeRepository, RecipeUpdate};
use crate::web::dto::{
    CreateRecipeRequest, RecipeResponse, UpdateRecipeRequest, UpdateRecipeTitlesRequest,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

fn parse_recipe_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::not_found("Recipe not found"))
}

/// GET /receitas - List all recipes.
pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let recipes = RecipeRepository::new(&state.store).list().await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

/// GET /receitas/:id - Get a single recipe.
pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let id = parse_recipe_id(&id)?;
    let recipe = RecipeRepository::new(&state.store)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;
    Ok(Json(RecipeResponse::from(recipe)))
}

/// POST /receitas - Create a recipe.
pub async fn create_recipe(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateRecipeRequest>,
) -> Result<StatusCode, ApiError> {
    RecipeRepository::new(&state.store)
        .create(&req.titulo, &req.preparo, &req.ingredientes)
        .await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /receitas/:id - Delete a single recipe.
pub async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_recipe_id(&id)?;
    let recipes = RecipeRepository::new(&state.store);

    if recipes.find_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("Recipe not found"));
    }

    recipes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /receitas/muitas/:filtroIngredientes - Bulk delete by exact
/// ingredient match.
///
/// Succeeds even when nothing matched. The filter is compared for exact
/// equality against `ingredientes`, unlike the bulk update's substring match.
pub async fn delete_recipes_by_ingredient(
    State(state): State<Arc<AppState>>,
    Path(filter): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = RecipeRepository::new(&state.store)
        .delete_by_ingredient(&filter)
        .await?;
    tracing::debug!(filter = %filter, deleted, "bulk recipe delete");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /receitas/:id - Overwrite all recipe fields.
pub async fn update_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateRecipeRequest>,
) -> Result<StatusCode, ApiError> {
    let id = parse_recipe_id(&id)?;
    let update = RecipeUpdate {
        titulo: req.titulo,
        preparo: req.preparo,
        ingredientes: req.ingredientes,
    };

    let matched = RecipeRepository::new(&state.store).update(id, &update).await?;
    if !matched {
        return Err(ApiError::not_found("Recipe not found"));
    }

    Ok(StatusCode::OK)
}

/// PUT /receitas/muitas/:filtroIngredientes - Bulk title update by
/// case-insensitive ingredient substring.
///
/// Succeeds even when nothing matched.
pub async fn update_recipes_by_ingredient(
    State(state): State<Arc<AppState>>,
    Path(filter): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateRecipeTitlesRequest>,
) -> Result<StatusCode, ApiError> {
    let updated = RecipeRepository::new(&state.store)
        .update_titles_by_ingredient(&filter, &req.titulo)
        .await?;
    tracing::debug!(filter = %filter, updated, "bulk recipe title update");
    Ok(StatusCode::OK)
}
