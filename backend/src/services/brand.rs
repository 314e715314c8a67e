//! Branding settings

use shared::validation::validate_brand_settings;
use shared::{find_preset, BrandSettings, CatalogError};

use crate::error::AppResult;
use crate::storage::{KitchenStore, Scope};

#[derive(Clone)]
pub struct BrandService {
    store: KitchenStore,
}

impl BrandService {
    pub fn new(store: KitchenStore) -> Self {
        Self { store }
    }

    pub async fn get_settings(&self) -> AppResult<BrandSettings> {
        Ok(self.store.snapshot(Scope::Catalog).await?.brand_settings)
    }

    pub async fn update_settings(&self, settings: BrandSettings) -> AppResult<BrandSettings> {
        validate_brand_settings(&settings)?;
        self.replace(|current| *current = settings).await
    }

    /// Restore the default look
    pub async fn reset(&self) -> AppResult<BrandSettings> {
        self.replace(|current| *current = BrandSettings::default()).await
    }

    /// Apply a named colour preset over the current settings
    pub async fn apply_preset(&self, name: &str) -> AppResult<BrandSettings> {
        let preset = find_preset(name).ok_or_else(|| CatalogError::NotFound {
            entity: "Colour preset",
            id: name.to_string(),
        })?;
        self.replace(|current| current.apply_preset(preset)).await
    }

    async fn replace(&self, change: impl FnOnce(&mut BrandSettings)) -> AppResult<BrandSettings> {
        let mut tx = self.store.begin(Scope::Catalog).await?;
        change(&mut tx.data.brand_settings);
        let data = tx.commit().await?;

        tracing::info!(company_name = %data.brand_settings.company_name, "Brand settings saved");
        Ok(data.brand_settings)
    }
}
