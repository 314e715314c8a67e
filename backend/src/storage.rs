//! PostgreSQL persistence of the kitchen collections
//!
//! Each collection lives as one JSONB document in `kv_store` under the same
//! key the browser build uses. Writers lock their keys with
//! `SELECT ... FOR UPDATE` for the whole read-modify-write, always in the
//! order of [`Scope::keys`].

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};

use shared::storage::keys;
use shared::{seed, BrandSettings, KitchenData, StorageError};

use crate::error::AppResult;

/// The collections an operation touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Recipes, categories and brand settings
    Catalog,
    /// Inventory items, transactions and alerts
    Stock,
    All,
}

const CATALOG_KEYS: [&str; 3] = [keys::RECIPES, keys::CATEGORIES, keys::BRAND_SETTINGS];
const STOCK_KEYS: [&str; 3] = [keys::INVENTORY, keys::TRANSACTIONS, keys::ALERTS];

impl Scope {
    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            Scope::Catalog => CATALOG_KEYS.to_vec(),
            Scope::Stock => STOCK_KEYS.to_vec(),
            Scope::All => CATALOG_KEYS.iter().chain(STOCK_KEYS.iter()).copied().collect(),
        }
    }

    fn includes_catalog(&self) -> bool {
        matches!(self, Scope::Catalog | Scope::All)
    }

    fn includes_stock(&self) -> bool {
        matches!(self, Scope::Stock | Scope::All)
    }
}

/// Handle to the key/value table
#[derive(Clone)]
pub struct KitchenStore {
    db: PgPool,
    load_defaults: bool,
}

impl KitchenStore {
    pub fn new(db: PgPool, load_defaults: bool) -> Self {
        Self { db, load_defaults }
    }

    /// Read the collections in `scope` without taking locks
    pub async fn snapshot(&self, scope: Scope) -> AppResult<KitchenData> {
        let mut data = KitchenData::default();
        for key in scope.keys() {
            let value = sqlx::query_scalar::<_, Value>("SELECT value FROM kv_store WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.db)
                .await?;
            self.fill(&mut data, key, value)?;
        }
        Ok(data)
    }

    /// Start a read-modify-write over `scope`
    pub async fn begin(&self, scope: Scope) -> AppResult<KitchenTx> {
        let mut tx = self.db.begin().await?;
        let mut data = KitchenData::default();

        for key in scope.keys() {
            // Make sure the row exists so FOR UPDATE has something to lock
            sqlx::query(
                "INSERT INTO kv_store (key, value) VALUES ($1, 'null'::jsonb) ON CONFLICT (key) DO NOTHING",
            )
            .bind(key)
            .execute(&mut *tx)
            .await?;

            let value = sqlx::query_scalar::<_, Value>("SELECT value FROM kv_store WHERE key = $1 FOR UPDATE")
                .bind(key)
                .fetch_optional(&mut *tx)
                .await?;
            self.fill(&mut data, key, value)?;
        }

        Ok(KitchenTx { tx, scope, data })
    }

    fn fill(&self, data: &mut KitchenData, key: &str, value: Option<Value>) -> Result<(), StorageError> {
        let value = value.filter(|value| !value.is_null());
        match key {
            keys::RECIPES => {
                data.recipes = decode(key, value)?.unwrap_or_else(|| self.default_or_empty(seed::default_recipes))
            }
            keys::CATEGORIES => {
                data.categories =
                    decode(key, value)?.unwrap_or_else(|| self.default_or_empty(seed::default_categories))
            }
            keys::BRAND_SETTINGS => data.brand_settings = decode(key, value)?.unwrap_or_else(BrandSettings::default),
            keys::INVENTORY => data.inventory = decode(key, value)?.unwrap_or_default(),
            keys::TRANSACTIONS => data.transactions = decode(key, value)?.unwrap_or_default(),
            keys::ALERTS => data.alerts = decode(key, value)?.unwrap_or_default(),
            other => return Err(StorageError::Backend(format!("Unknown storage key {}", other))),
        }
        Ok(())
    }

    fn default_or_empty<T>(&self, defaults: fn() -> Vec<T>) -> Vec<T> {
        if self.load_defaults {
            defaults()
        } else {
            Vec::new()
        }
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: Option<Value>) -> Result<Option<T>, StorageError> {
    value
        .map(|value| {
            serde_json::from_value(value).map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Value, StorageError> {
    serde_json::to_value(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })
}

/// Locked collections; dropping without [`KitchenTx::commit`] rolls back
pub struct KitchenTx {
    tx: Transaction<'static, Postgres>,
    scope: Scope,
    pub data: KitchenData,
}

impl KitchenTx {
    /// Write back every collection in scope and commit
    pub async fn commit(mut self) -> AppResult<KitchenData> {
        let mut documents = Vec::new();
        if self.scope.includes_catalog() {
            documents.push((keys::RECIPES, encode(keys::RECIPES, &self.data.recipes)?));
            documents.push((keys::CATEGORIES, encode(keys::CATEGORIES, &self.data.categories)?));
            documents.push((keys::BRAND_SETTINGS, encode(keys::BRAND_SETTINGS, &self.data.brand_settings)?));
        }
        if self.scope.includes_stock() {
            documents.push((keys::INVENTORY, encode(keys::INVENTORY, &self.data.inventory)?));
            documents.push((keys::TRANSACTIONS, encode(keys::TRANSACTIONS, &self.data.transactions)?));
            documents.push((keys::ALERTS, encode(keys::ALERTS, &self.data.alerts)?));
        }

        for (key, value) in documents {
            sqlx::query("UPDATE kv_store SET value = $2, updated_at = NOW() WHERE key = $1")
                .bind(key)
                .bind(value)
                .execute(&mut *self.tx)
                .await?;
        }

        self.tx.commit().await?;
        Ok(self.data)
    }
}
