//! Static credential table and session lifetime
//!
//! The recipe and inventory operations only ever ask one question of this
//! module: is the current user privileged.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, StorageError};
use crate::models::{LoginCredentials, User, UserRole};
use crate::storage::{keys, load_json, save_json, KeyValueStore};

/// Sessions last eight hours from login
pub const SESSION_DURATION_SECS: i64 = 8 * 60 * 60;

/// One row of the credential table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub name: String,
}

impl Account {
    fn new(username: &str, password: &str, role: UserRole, name: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role,
            name: name.to_string(),
        }
    }

    /// The user record created on login
    pub fn to_user(&self, now: DateTime<Utc>) -> User {
        User {
            id: self.username.clone(),
            username: self.username.clone(),
            role: self.role,
            name: self.name.clone(),
            created_at: now,
            last_login: Some(now),
        }
    }
}

pub fn demo_accounts() -> Vec<Account> {
    vec![
        Account::new("manager", "manager123", UserRole::Manager, "Kitchen Manager"),
        Account::new("staff", "staff123", UserRole::KitchenStaff, "Kitchen Staff"),
    ]
}

/// A signed-in user and the instant the session ends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn start(user: User, now: DateTime<Utc>) -> Self {
        Self {
            user,
            expires_at: now + Duration::seconds(SESSION_DURATION_SECS),
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_privileged(&self) -> bool {
        self.user.is_privileged()
    }
}

/// Check credentials against the table. Usernames and passwords are
/// compared exactly.
pub fn authenticate(
    accounts: &[Account],
    credentials: &LoginCredentials,
    now: DateTime<Utc>,
) -> Result<Session, AuthError> {
    accounts
        .iter()
        .find(|account| account.username == credentials.username && account.password == credentials.password)
        .map(|account| Session::start(account.to_user(now), now))
        .ok_or(AuthError::InvalidCredentials)
}

/// Gate for management operations
pub fn require_privileged(privileged: bool) -> Result<(), AuthError> {
    if privileged {
        Ok(())
    } else {
        Err(AuthError::NotPrivileged)
    }
}

/// Persist a session as `auth-user` plus `auth-expiry` in epoch milliseconds
pub fn save_session<S: KeyValueStore + ?Sized>(store: &mut S, session: &Session) -> Result<(), StorageError> {
    save_json(store, keys::AUTH_USER, &session.user)?;
    store.set(keys::AUTH_EXPIRY, &session.expires_at.timestamp_millis().to_string())
}

/// Restore a saved session, clearing it when it has expired or is unreadable
pub fn restore_session<S: KeyValueStore + ?Sized>(
    store: &mut S,
    now: DateTime<Utc>,
) -> Result<Option<Session>, StorageError> {
    let expiry = store
        .get(keys::AUTH_EXPIRY)?
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single());
    let user: Option<User> = load_json(store, keys::AUTH_USER).unwrap_or(None);

    match (user, expiry) {
        (Some(user), Some(expires_at)) if now < expires_at => Ok(Some(Session { user, expires_at })),
        (None, None) => Ok(None),
        _ => {
            clear_session(store)?;
            Ok(None)
        }
    }
}

pub fn clear_session<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StorageError> {
    store.remove(keys::AUTH_USER)?;
    store.remove(keys::AUTH_EXPIRY)
}
