//! HTTP handlers for export, import and the data summary

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use shared::transfer::{export_file_name, ExportKind, ImportSummary};
use shared::DataSummary;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::DataService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "type", default)]
    pub kind: ExportKind,
}

/// Download an export document
pub async fn export_data(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    current_user.require_privileged()?;
    let service = DataService::new(state.store);
    let file = service.export(query.kind).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(query.kind, Utc::now())
    );
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(file)))
}

/// Merge an uploaded export document
pub async fn import_data(
    State(state): State<AppState>,
    current_user: CurrentUser,
    body: String,
) -> AppResult<Json<ImportSummary>> {
    current_user.require_privileged()?;
    let service = DataService::new(state.store);
    Ok(Json(service.import(&body).await?))
}

pub async fn data_summary(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<DataSummary>> {
    let service = DataService::new(state.store);
    Ok(Json(service.summary().await?))
}
