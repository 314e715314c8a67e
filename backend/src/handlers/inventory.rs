//! HTTP handlers for inventory management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::ledger::{NewInventoryItem, StockMovement};
use shared::{InventoryItem, InventoryReport, StockAlert, StockTransaction};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::inventory::TransactionFilter;
use crate::services::InventoryService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertQuery {
    #[serde(default)]
    pub include_acknowledged: bool,
}

/// List inventory items
pub async fn list_items(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let service = InventoryService::new(state.store);
    Ok(Json(service.list_items().await?))
}

pub async fn get_item(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<InventoryItem>> {
    let service = InventoryService::new(state.store);
    Ok(Json(service.get_item(&item_id).await?))
}

/// Create an inventory item
pub async fn create_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<NewInventoryItem>,
) -> AppResult<(StatusCode, Json<InventoryItem>)> {
    current_user.require_privileged()?;
    let service = InventoryService::new(state.store);
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an inventory item
pub async fn update_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<String>,
    Json(item): Json<InventoryItem>,
) -> AppResult<Json<InventoryItem>> {
    current_user.require_privileged()?;
    let service = InventoryService::new(state.store);
    Ok(Json(service.update_item(&item_id, item).await?))
}

/// Delete an inventory item with its transactions and alerts
pub async fn delete_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<InventoryItem>> {
    current_user.require_privileged()?;
    let service = InventoryService::new(state.store);
    Ok(Json(service.delete_item(&item_id).await?))
}

/// Record a manual stock movement
pub async fn record_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<String>,
    Json(movement): Json<StockMovement>,
) -> AppResult<(StatusCode, Json<StockTransaction>)> {
    current_user.require_privileged()?;
    let service = InventoryService::new(state.store);
    let transaction = service
        .record_movement(&item_id, movement, &current_user.0.username)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// List transactions, most recent first
pub async fn list_transactions(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(filter): Query<TransactionFilter>,
) -> AppResult<Json<Vec<StockTransaction>>> {
    let service = InventoryService::new(state.store);
    Ok(Json(service.list_transactions(filter).await?))
}

/// List alerts; unacknowledged only unless asked otherwise
pub async fn list_alerts(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<AlertQuery>,
) -> AppResult<Json<Vec<StockAlert>>> {
    let service = InventoryService::new(state.store);
    Ok(Json(service.list_alerts(query.include_acknowledged).await?))
}

pub async fn acknowledge_alert(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(alert_id): Path<String>,
) -> AppResult<Json<StockAlert>> {
    current_user.require_privileged()?;
    let service = InventoryService::new(state.store);
    Ok(Json(service.acknowledge_alert(&alert_id).await?))
}

/// Inventory report
pub async fn get_report(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<InventoryReport>> {
    let service = InventoryService::new(state.store);
    Ok(Json(service.report().await?))
}
