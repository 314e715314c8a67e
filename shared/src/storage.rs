//! Key/value persistence of the application collections
//!
//! Each collection is stored as one JSON document under a stable key.
//! Writes are last-write-wins; there is no schema migration.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::kitchen::KitchenData;
use crate::models::{BrandSettings, Category, InventoryItem, Recipe, StockAlert, StockTransaction};
use crate::seed;

/// Storage keys, shared with the browser build
pub mod keys {
    pub const RECIPES: &str = "cookie-recipes";
    pub const CATEGORIES: &str = "recipe-categories";
    pub const BRAND_SETTINGS: &str = "brand-settings";
    pub const INVENTORY: &str = "inventory-items";
    pub const TRANSACTIONS: &str = "inventory-transactions";
    pub const ALERTS: &str = "inventory-alerts";
    pub const AUTH_USER: &str = "auth-user";
    pub const AUTH_EXPIRY: &str = "auth-expiry";
}

/// String key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store, used by tests and native tools
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Read a JSON value stored under `key`
pub fn load_json<S, T>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Write `value` as JSON under `key`
pub fn save_json<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Typed access to the collections over any [`KeyValueStore`]
///
/// Recipes, categories and brand settings fall back to the bundled
/// defaults when nothing is stored. Inventory collections start empty.
pub struct Repository<S> {
    store: S,
}

impl<S: KeyValueStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn load_recipes(&self) -> Result<Vec<Recipe>, StorageError> {
        Ok(load_json(&self.store, keys::RECIPES)?.unwrap_or_else(seed::default_recipes))
    }

    pub fn save_recipes(&mut self, recipes: &[Recipe]) -> Result<(), StorageError> {
        save_json(&mut self.store, keys::RECIPES, recipes)
    }

    pub fn load_categories(&self) -> Result<Vec<Category>, StorageError> {
        Ok(load_json(&self.store, keys::CATEGORIES)?.unwrap_or_else(seed::default_categories))
    }

    pub fn save_categories(&mut self, categories: &[Category]) -> Result<(), StorageError> {
        save_json(&mut self.store, keys::CATEGORIES, categories)
    }

    pub fn load_brand_settings(&self) -> Result<BrandSettings, StorageError> {
        Ok(load_json(&self.store, keys::BRAND_SETTINGS)?.unwrap_or_default())
    }

    pub fn save_brand_settings(&mut self, settings: &BrandSettings) -> Result<(), StorageError> {
        save_json(&mut self.store, keys::BRAND_SETTINGS, settings)
    }

    pub fn load_inventory(&self) -> Result<Vec<InventoryItem>, StorageError> {
        Ok(load_json(&self.store, keys::INVENTORY)?.unwrap_or_default())
    }

    pub fn save_inventory(&mut self, inventory: &[InventoryItem]) -> Result<(), StorageError> {
        save_json(&mut self.store, keys::INVENTORY, inventory)
    }

    pub fn load_transactions(&self) -> Result<Vec<StockTransaction>, StorageError> {
        Ok(load_json(&self.store, keys::TRANSACTIONS)?.unwrap_or_default())
    }

    pub fn save_transactions(&mut self, transactions: &[StockTransaction]) -> Result<(), StorageError> {
        save_json(&mut self.store, keys::TRANSACTIONS, transactions)
    }

    pub fn load_alerts(&self) -> Result<Vec<StockAlert>, StorageError> {
        Ok(load_json(&self.store, keys::ALERTS)?.unwrap_or_default())
    }

    pub fn save_alerts(&mut self, alerts: &[StockAlert]) -> Result<(), StorageError> {
        save_json(&mut self.store, keys::ALERTS, alerts)
    }

    pub fn load_all(&self) -> Result<KitchenData, StorageError> {
        Ok(KitchenData {
            recipes: self.load_recipes()?,
            categories: self.load_categories()?,
            brand_settings: self.load_brand_settings()?,
            inventory: self.load_inventory()?,
            transactions: self.load_transactions()?,
            alerts: self.load_alerts()?,
        })
    }

    /// Persist the recipe side: recipes, categories and brand settings
    pub fn save_catalog(&mut self, data: &KitchenData) -> Result<(), StorageError> {
        self.save_recipes(&data.recipes)?;
        self.save_categories(&data.categories)?;
        self.save_brand_settings(&data.brand_settings)
    }

    /// Persist the inventory side: items, transactions and alerts
    pub fn save_stock(&mut self, data: &KitchenData) -> Result<(), StorageError> {
        self.save_inventory(&data.inventory)?;
        self.save_transactions(&data.transactions)?;
        self.save_alerts(&data.alerts)
    }

    pub fn save_all(&mut self, data: &KitchenData) -> Result<(), StorageError> {
        self.save_catalog(data)?;
        self.save_stock(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_defaults() {
        let repo = Repository::new(MemoryStore::new());
        let data = repo.load_all().unwrap();
        assert_eq!(data.recipes.len(), 3);
        assert_eq!(data.categories.len(), 4);
        assert_eq!(data.brand_settings, BrandSettings::default());
        assert!(data.inventory.is_empty());
        assert!(data.alerts.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut repo = Repository::new(MemoryStore::new());
        let mut data = repo.load_all().unwrap();
        data.recipes.truncate(1);
        data.brand_settings.company_name = "Crumb & Co".into();
        repo.save_all(&data).unwrap();

        assert_eq!(repo.load_all().unwrap(), data);
        assert!(repo.store().get(keys::RECIPES).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let mut store = MemoryStore::new();
        store.set(keys::INVENTORY, "{not json").unwrap();
        let repo = Repository::new(store);
        assert!(matches!(
            repo.load_inventory(),
            Err(StorageError::Corrupt { ref key, .. }) if key == keys::INVENTORY
        ));
    }
}
