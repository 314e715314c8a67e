//! HTTP handlers for branding endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{BrandSettings, ColorPreset, COLOR_PRESETS};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::BrandService;
use crate::AppState;

pub async fn get_brand_settings(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<BrandSettings>> {
    let service = BrandService::new(state.store);
    Ok(Json(service.get_settings().await?))
}

pub async fn update_brand_settings(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(settings): Json<BrandSettings>,
) -> AppResult<Json<BrandSettings>> {
    current_user.require_privileged()?;
    let service = BrandService::new(state.store);
    Ok(Json(service.update_settings(settings).await?))
}

pub async fn reset_brand_settings(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<BrandSettings>> {
    current_user.require_privileged()?;
    let service = BrandService::new(state.store);
    Ok(Json(service.reset().await?))
}

/// The built-in colour presets
pub async fn list_presets(_current_user: CurrentUser) -> Json<Vec<ColorPreset>> {
    Json(COLOR_PRESETS.to_vec())
}

pub async fn apply_preset(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(name): Path<String>,
) -> AppResult<Json<BrandSettings>> {
    current_user.require_privileged()?;
    let service = BrandService::new(state.store);
    Ok(Json(service.apply_preset(&name).await?))
}
