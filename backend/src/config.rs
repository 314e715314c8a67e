//! Configuration management for the recipe server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with KRC_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::UserRole;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT session configuration
    pub jwt: JwtConfig,

    /// Login accounts; the demo table is used when empty
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,

    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing session tokens
    pub secret: String,

    /// Session lifetime in seconds
    pub session_expiry: i64,
}

/// A configured login with a bcrypt password hash
#[derive(Debug, Deserialize, Clone)]
pub struct AccountConfig {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// Serve the bundled recipes and categories while nothing is stored
    pub load_defaults: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("KRC_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("jwt.session_expiry", shared::auth::SESSION_DURATION_SECS)?
            .set_default("seed.load_defaults", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (KRC_ prefix)
            .add_source(
                Environment::with_prefix("KRC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
