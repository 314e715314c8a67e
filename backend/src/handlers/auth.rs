//! Authentication handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{LoginCredentials, User};

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::services::auth::AuthTokens;
use crate::services::AuthService;
use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: User,
    pub is_privileged: bool,
    pub expires_at: DateTime<Utc>,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginCredentials>,
) -> Result<Json<AuthTokens>, AppError> {
    let auth_service = AuthService::new(&state.config, state.accounts.clone());
    let tokens = auth_service.login(&body).await.map_err(|err| {
        tracing::warn!(username = %body.username, "Login failed");
        err
    })?;

    tracing::info!(username = %tokens.user.username, role = tokens.user.role.as_str(), "Signed in");
    Ok(Json(tokens))
}

/// Current session
pub async fn session(current_user: CurrentUser) -> Json<SessionResponse> {
    let CurrentUser(auth_user) = current_user;
    Json(SessionResponse {
        is_privileged: auth_user.is_privileged(),
        expires_at: auth_user.expires_at,
        user: auth_user.user,
    })
}
