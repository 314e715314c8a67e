//! User and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A signed-in kitchen user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Privileged users may manage recipes, inventory, branding and data
    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}

/// User roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    Manager,
    KitchenStaff,
    Developer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Manager => "manager",
            UserRole::KitchenStaff => "kitchen-staff",
            UserRole::Developer => "developer",
        }
    }

    pub fn is_privileged(&self) -> bool {
        matches!(self, UserRole::Manager)
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(UserRole::Manager),
            "kitchen-staff" => Ok(UserRole::KitchenStaff),
            "developer" => Ok(UserRole::Developer),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Login form input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginCredentials {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
