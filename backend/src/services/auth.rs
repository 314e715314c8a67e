//! Authentication service for login and session tokens
//!
//! Credentials come from configuration (bcrypt hashes) or, when none are
//! configured, from the demo table hashed at start-up.

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::{LoginCredentials, User, UserRole};
use validator::Validate;

use crate::config::{AccountConfig, Config};
use crate::error::{AppError, AppResult};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    session_expiry: i64,
    accounts: Arc<Vec<AccountConfig>>,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Username
    pub role: UserRole,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user(&self) -> User {
        let issued_at = timestamp(self.iat);
        User {
            id: self.sub.clone(),
            username: self.sub.clone(),
            role: self.role,
            name: self.name.clone(),
            created_at: issued_at,
            last_login: Some(issued_at),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp(self.exp)
    }
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_else(Utc::now)
}

/// Issued session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: &Config, accounts: Arc<Vec<AccountConfig>>) -> Self {
        Self {
            jwt_secret: config.jwt.secret.clone(),
            session_expiry: config.jwt.session_expiry,
            accounts,
        }
    }

    /// Accounts to accept: the configured ones, or the hashed demo table
    pub fn load_accounts(config: &Config) -> AppResult<Vec<AccountConfig>> {
        if !config.accounts.is_empty() {
            return Ok(config.accounts.clone());
        }

        shared::auth::demo_accounts()
            .into_iter()
            .map(|account| {
                let password_hash = hash(&account.password, DEFAULT_COST)
                    .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
                Ok(AccountConfig {
                    username: account.username,
                    password_hash,
                    role: account.role,
                    name: account.name,
                })
            })
            .collect()
    }

    /// Authenticate with username and password
    pub async fn login(&self, credentials: &LoginCredentials) -> AppResult<AuthTokens> {
        credentials.validate()?;

        let account = self
            .accounts
            .iter()
            .find(|account| account.username == credentials.username)
            .ok_or(AppError::InvalidCredentials)?;

        // Verify password
        let valid = verify(&credentials.password, &account.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        self.issue_token(account, Utc::now())
    }

    /// Validate an access token and return its claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }

    fn issue_token(&self, account: &AccountConfig, now: DateTime<Utc>) -> AppResult<AuthTokens> {
        let expires_at = now + Duration::seconds(self.session_expiry);
        let claims = Claims {
            sub: account.username.clone(),
            role: account.role,
            name: account.name.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.session_expiry,
            expires_at,
            user: claims.user(),
        })
    }
}
