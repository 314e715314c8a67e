//! HTTP handlers for recipe endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{Feasibility, ProductionRun, Recipe, ScaledRecipe};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::RecipeService;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeQuery {
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuantityQuery {
    pub quantity: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduceRequest {
    pub target_quantity: Decimal,
}

/// List recipes
pub async fn list_recipes(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<RecipeQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    let service = RecipeService::new(state.store);
    let recipes = service.list_recipes(query.category_id.as_deref()).await?;
    Ok(Json(recipes))
}

/// Get a recipe by id
pub async fn get_recipe(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(recipe_id): Path<String>,
) -> AppResult<Json<Recipe>> {
    let service = RecipeService::new(state.store);
    let recipe = service.get_recipe(&recipe_id).await?;
    Ok(Json(recipe))
}

/// Create a recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(recipe): Json<Recipe>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    current_user.require_privileged()?;
    let service = RecipeService::new(state.store);
    let recipe = service.create_recipe(recipe).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Update a recipe
pub async fn update_recipe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(recipe_id): Path<String>,
    Json(recipe): Json<Recipe>,
) -> AppResult<Json<Recipe>> {
    current_user.require_privileged()?;
    let service = RecipeService::new(state.store);
    let recipe = service.update_recipe(&recipe_id, recipe).await?;
    Ok(Json(recipe))
}

/// Delete a recipe
pub async fn delete_recipe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(recipe_id): Path<String>,
) -> AppResult<Json<Recipe>> {
    current_user.require_privileged()?;
    let service = RecipeService::new(state.store);
    let removed = service.delete_recipe(&recipe_id).await?;
    Ok(Json(removed))
}

/// Scale a recipe to a target quantity
pub async fn scale_recipe(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(recipe_id): Path<String>,
    Query(query): Query<QuantityQuery>,
) -> AppResult<Json<ScaledRecipe>> {
    let service = RecipeService::new(state.store);
    let scaled = service.scale(&recipe_id, query.quantity).await?;
    Ok(Json(scaled))
}

/// Check stock for a production run
pub async fn check_feasibility(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(recipe_id): Path<String>,
    Query(query): Query<QuantityQuery>,
) -> AppResult<Json<Feasibility>> {
    let service = RecipeService::new(state.store);
    let feasibility = service.feasibility(&recipe_id, query.quantity).await?;
    Ok(Json(feasibility))
}

/// Commit a production run and deduct its ingredients
pub async fn produce_recipe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(recipe_id): Path<String>,
    Json(body): Json<ProduceRequest>,
) -> AppResult<Json<ProductionRun>> {
    let service = RecipeService::new(state.store);
    let run = service
        .produce(&recipe_id, body.target_quantity, &current_user.0.username)
        .await?;
    Ok(Json(run))
}
