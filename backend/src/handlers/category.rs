//! HTTP handlers for category endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::Category;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::CategoryService;
use crate::AppState;

pub async fn list_categories(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Category>>> {
    let service = CategoryService::new(state.store);
    Ok(Json(service.list_categories().await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(category): Json<Category>,
) -> AppResult<(StatusCode, Json<Category>)> {
    current_user.require_privileged()?;
    let service = CategoryService::new(state.store);
    let category = service.create_category(category).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<String>,
    Json(category): Json<Category>,
) -> AppResult<Json<Category>> {
    current_user.require_privileged()?;
    let service = CategoryService::new(state.store);
    Ok(Json(service.update_category(&category_id, category).await?))
}

/// Delete a category; refused while recipes still belong to it
pub async fn delete_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<String>,
) -> AppResult<Json<Category>> {
    current_user.require_privileged()?;
    let service = CategoryService::new(state.store);
    Ok(Json(service.delete_category(&category_id).await?))
}
