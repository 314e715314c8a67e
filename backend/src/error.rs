//! Error handling for the recipe server
//!
//! Every failure is reported as `{ "error": { "code", "message", "field"? } }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{AuthError, CatalogError, ImportError, KitchenError, ScalingError, StorageError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Recipe errors
    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    #[error("Quantity overflow: {0}")]
    QuantityOverflow(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }

    fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("INVALID_CREDENTIALS", "Invalid username or password"),
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("TOKEN_EXPIRED", "Session has expired, please sign in again"),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("INVALID_TOKEN", "Invalid token"),
            ),
            AppError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                ErrorDetail::new(
                    "INSUFFICIENT_PERMISSIONS",
                    "You do not have permission to perform this action",
                ),
            ),
            AppError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("UNAUTHORIZED", message.clone()),
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", message.clone()).with_field(field),
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", msg.clone()),
            ),
            AppError::DuplicateEntry(what) => (
                StatusCode::CONFLICT,
                ErrorDetail::new("DUPLICATE_ENTRY", format!("{} already exists", what)),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorDetail::new("CONFLICT", msg.clone())),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource)),
            ),
            AppError::InvalidRecipe(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::new("INVALID_RECIPE", msg.clone()),
            ),
            AppError::QuantityOverflow(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail::new("QUANTITY_OVERFLOW", msg.clone()),
            ),
            AppError::InvalidImport(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("INVALID_IMPORT", msg.clone()),
            ),
            AppError::StorageError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("STORAGE_ERROR", format!("Storage error: {}", msg)),
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("DATABASE_ERROR", "A database error occurred"),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.clone()),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { entity, id } => AppError::NotFound(format!("{} {}", entity, id)),
            CatalogError::Duplicate { entity, id } => AppError::DuplicateEntry(format!("{} {}", entity, id)),
            CatalogError::CategoryInUse { .. } => AppError::Conflict(err.to_string()),
            CatalogError::Validation { field, message } => AppError::Validation { field, message },
        }
    }
}

impl From<ScalingError> for AppError {
    fn from(err: ScalingError) -> Self {
        match err {
            ScalingError::InvalidRecipe { .. } => AppError::InvalidRecipe(err.to_string()),
            ScalingError::NegativeTarget(_) => AppError::Validation {
                field: "quantity".to_string(),
                message: err.to_string(),
            },
            ScalingError::Overflow(_) => AppError::QuantityOverflow(err.to_string()),
        }
    }
}

impl From<KitchenError> for AppError {
    fn from(err: KitchenError) -> Self {
        match err {
            KitchenError::Catalog(err) => err.into(),
            KitchenError::Scaling(err) => err.into(),
        }
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        AppError::InvalidImport(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::StorageError(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::SessionExpired => AppError::TokenExpired,
            AuthError::NotPrivileged => AppError::InsufficientPermissions,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("Serialization failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        match errors.field_errors().into_iter().next() {
            Some((field, field_errors)) => AppError::Validation {
                field: field.to_string(),
                message: field_errors
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field)),
            },
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
