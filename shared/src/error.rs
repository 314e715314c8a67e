//! Error types for the recipe core

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while computing a scaling factor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalingError {
    /// The recipe's own batch size is unusable
    #[error("Invalid recipe {recipe_id}: batch size must be positive, got {batch_size}")]
    InvalidRecipe {
        recipe_id: String,
        batch_size: Decimal,
    },

    #[error("Target quantity cannot be negative, got {0}")]
    NegativeTarget(Decimal),

    #[error("Quantity {0} is too large to calculate")]
    Overflow(Decimal),
}

/// Errors raised while reading an export file
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid file format: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid file format: missing {0}")]
    MissingField(&'static str),

    #[error("Unsupported export type: {0}")]
    UnsupportedType(String),
}

/// Errors from the key/value storage collaborator
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Stored value for {key} is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors from the static credential table and sessions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("This action requires a manager account")]
    NotPrivileged,
}

/// Errors from recipe, category and inventory CRUD
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} {id} already exists")]
    Duplicate { entity: &'static str, id: String },

    #[error("Cannot delete category. It contains {count} recipe(s).")]
    CategoryInUse { count: usize },

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },
}

impl CatalogError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors from operations that span several collections
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KitchenError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Scaling(#[from] ScalingError),
}
