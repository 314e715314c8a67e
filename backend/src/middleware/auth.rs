//! Authentication middleware
//!
//! Validates the bearer token and exposes the signed-in user to handlers

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{DateTime, Utc};
use shared::{auth::require_privileged, User, UserRole};

use crate::error::{AppError, AppResult, ErrorDetail, ErrorResponse};
use crate::services::AuthService;
use crate::AppState;

/// Authenticated user information extracted from the token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub role: UserRole,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl AuthUser {
    /// Managers may change recipes, inventory, branding and data
    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}

/// Authentication middleware that validates session tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let TypedHeader(Authorization(bearer)) =
        bearer.ok_or_else(|| AppError::Unauthorized("Missing or invalid Authorization header".to_string()))?;

    let auth_service = AuthService::new(&state.config, state.accounts.clone());
    let claims = auth_service.validate_token(bearer.token())?;

    let auth_user = AuthUser {
        username: claims.sub.clone(),
        role: claims.role,
        user: claims.user(),
        expires_at: claims.expires_at(),
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

impl CurrentUser {
    /// Reject the request unless the user is privileged
    pub fn require_privileged(&self) -> AppResult<()> {
        require_privileged(self.0.is_privileged()).map_err(|err| {
            tracing::warn!(username = %self.0.username, "Privileged action refused");
            AppError::from(err)
        })
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: ErrorDetail::new("UNAUTHORIZED", "Authentication required"),
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}
