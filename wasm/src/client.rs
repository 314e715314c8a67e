//! Browser-side application state over a key/value store
//!
//! Holds the loaded collections and the signed-in session. Mutations are
//! applied to a copy and only replace the in-memory data once the store
//! has accepted the write.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::auth::{
    authenticate, clear_session, demo_accounts, require_privileged, restore_session, save_session, Session,
};
use shared::catalog::{self, get_by_id};
use shared::ledger::{self, record_stock_movement, NewInventoryItem, StockMovement};
use shared::validation::validate_brand_settings;
use shared::storage::{KeyValueStore, Repository};
use shared::transfer::{apply_import, parse_import, ExportFile, ExportKind, ImportSummary};
use shared::{
    alerts, can_make_recipe, find_preset, scale_recipe, AuthError, BrandSettings, CatalogError, Category,
    DataSummary, Feasibility, ImportError, InventoryItem, InventoryReport, KitchenData, KitchenError,
    LoginCredentials, ProductionRun, Recipe, ScaledRecipe, ScalingError, StockAlert, StockTransaction,
    StorageError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Please sign in first")]
    NotSignedIn,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Kitchen(#[from] KitchenError),

    #[error(transparent)]
    Scaling(#[from] ScalingError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid input: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which stored collections a change touched
#[derive(Debug, Clone, Copy)]
enum Section {
    Catalog,
    Stock,
    All,
}

pub struct KitchenClient<S> {
    repo: Repository<S>,
    data: KitchenData,
    session: Option<Session>,
}

impl<S: KeyValueStore> KitchenClient<S> {
    /// Load every collection and restore a saved session that is still valid
    pub fn open(store: S, now: DateTime<Utc>) -> Result<Self, ClientError> {
        let mut repo = Repository::new(store);
        let data = repo.load_all()?;
        let session = restore_session(repo.store_mut(), now)?;
        Ok(Self { repo, data, session })
    }

    pub fn data(&self) -> &KitchenData {
        &self.data
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn login(&mut self, username: &str, password: &str, now: DateTime<Utc>) -> Result<&Session, ClientError> {
        let credentials = LoginCredentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let session = authenticate(&demo_accounts(), &credentials, now)?;
        save_session(self.repo.store_mut(), &session)?;
        Ok(self.session.insert(session))
    }

    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.session = None;
        clear_session(self.repo.store_mut())?;
        Ok(())
    }

    /// Whether the current session is privileged; drops it once expired
    fn require_session(&mut self, now: DateTime<Utc>) -> Result<bool, ClientError> {
        let Some(session) = &self.session else {
            return Err(ClientError::NotSignedIn);
        };
        if session.is_active(now) {
            return Ok(session.is_privileged());
        }
        self.logout()?;
        Err(AuthError::SessionExpired.into())
    }

    fn require_manager(&mut self, now: DateTime<Utc>) -> Result<(), ClientError> {
        let privileged = self.require_session(now)?;
        require_privileged(privileged)?;
        Ok(())
    }

    fn commit<T>(
        &mut self,
        section: Section,
        change: impl FnOnce(&mut KitchenData) -> Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        let mut next = self.data.clone();
        let result = change(&mut next)?;
        match section {
            Section::Catalog => self.repo.save_catalog(&next)?,
            Section::Stock => self.repo.save_stock(&next)?,
            Section::All => self.repo.save_all(&next)?,
        }
        self.data = next;
        Ok(result)
    }

    pub fn recipes(&mut self, category_id: Option<&str>, now: DateTime<Utc>) -> Result<Vec<Recipe>, ClientError> {
        self.require_session(now)?;
        let recipes = match category_id {
            Some(id) => catalog::recipes_in_category(&self.data.recipes, id).cloned().collect(),
            None => self.data.recipes.clone(),
        };
        Ok(recipes)
    }

    pub fn scale(&mut self, recipe_id: &str, target: Decimal, now: DateTime<Utc>) -> Result<ScaledRecipe, ClientError> {
        self.require_session(now)?;
        let recipe = get_by_id(&self.data.recipes, recipe_id)?;
        Ok(scale_recipe(recipe, target)?)
    }

    pub fn feasibility(
        &mut self,
        recipe_id: &str,
        target: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Feasibility, ClientError> {
        self.require_session(now)?;
        let recipe = get_by_id(&self.data.recipes, recipe_id)?;
        Ok(can_make_recipe(recipe, target, &self.data.inventory)?)
    }

    /// Commit a production run, whether or not stock covers it
    pub fn produce(&mut self, recipe_id: &str, target: Decimal, now: DateTime<Utc>) -> Result<ProductionRun, ClientError> {
        self.require_session(now)?;
        self.commit(Section::Stock, |data| Ok(data.produce(recipe_id, target, now)?))
    }

    pub fn add_recipe(&mut self, recipe: Recipe, now: DateTime<Utc>) -> Result<String, ClientError> {
        self.require_manager(now)?;
        self.commit(Section::Catalog, |data| {
            get_by_id(&data.categories, &recipe.category_id)?;
            Ok(catalog::add_recipe(&mut data.recipes, recipe)?)
        })
    }

    pub fn update_recipe(&mut self, recipe: Recipe, now: DateTime<Utc>) -> Result<(), ClientError> {
        self.require_manager(now)?;
        self.commit(Section::Catalog, |data| {
            get_by_id(&data.categories, &recipe.category_id)?;
            Ok(catalog::update_recipe(&mut data.recipes, recipe)?)
        })
    }

    pub fn delete_recipe(&mut self, recipe_id: &str, now: DateTime<Utc>) -> Result<Recipe, ClientError> {
        self.require_manager(now)?;
        self.commit(Section::Catalog, |data| Ok(catalog::remove(&mut data.recipes, recipe_id)?))
    }

    pub fn add_category(&mut self, category: Category, now: DateTime<Utc>) -> Result<String, ClientError> {
        self.require_manager(now)?;
        self.commit(Section::Catalog, |data| Ok(catalog::add_category(&mut data.categories, category)?))
    }

    pub fn update_category(&mut self, category: Category, now: DateTime<Utc>) -> Result<(), ClientError> {
        self.require_manager(now)?;
        self.commit(Section::Catalog, |data| Ok(catalog::update_category(&mut data.categories, category)?))
    }

    /// Delete a category no recipe belongs to
    pub fn delete_category(&mut self, category_id: &str, now: DateTime<Utc>) -> Result<Category, ClientError> {
        self.require_manager(now)?;
        self.commit(Section::Catalog, |data| {
            Ok(catalog::delete_category(&mut data.categories, &data.recipes, category_id)?)
        })
    }

    pub fn update_brand_settings(
        &mut self,
        settings: BrandSettings,
        now: DateTime<Utc>,
    ) -> Result<BrandSettings, ClientError> {
        self.require_manager(now)?;
        validate_brand_settings(&settings)?;
        self.commit(Section::Catalog, |data| {
            data.brand_settings = settings;
            Ok(data.brand_settings.clone())
        })
    }

    pub fn reset_brand_settings(&mut self, now: DateTime<Utc>) -> Result<BrandSettings, ClientError> {
        self.update_brand_settings(BrandSettings::default(), now)
    }

    /// Apply a named colour preset over the current settings
    pub fn apply_color_preset(&mut self, name: &str, now: DateTime<Utc>) -> Result<BrandSettings, ClientError> {
        self.require_manager(now)?;
        let preset = find_preset(name).ok_or_else(|| CatalogError::NotFound {
            entity: "Colour preset",
            id: name.to_string(),
        })?;
        self.commit(Section::Catalog, |data| {
            data.brand_settings.apply_preset(preset);
            Ok(data.brand_settings.clone())
        })
    }

    pub fn add_item(&mut self, input: NewInventoryItem, now: DateTime<Utc>) -> Result<InventoryItem, ClientError> {
        self.require_manager(now)?;
        let item = input.into_item(now);
        self.commit(Section::Stock, |data| {
            ledger::add_item(&mut data.inventory, item.clone())?;
            data.refresh_alerts(now);
            Ok(item)
        })
    }

    pub fn update_item(&mut self, item: InventoryItem, now: DateTime<Utc>) -> Result<(), ClientError> {
        self.require_manager(now)?;
        self.commit(Section::Stock, |data| {
            ledger::update_item(&mut data.inventory, item)?;
            data.refresh_alerts(now);
            Ok(())
        })
    }

    /// Delete an item along with its transactions and alerts
    pub fn delete_item(&mut self, item_id: &str, now: DateTime<Utc>) -> Result<InventoryItem, ClientError> {
        self.require_manager(now)?;
        self.commit(Section::Stock, |data| {
            Ok(ledger::delete_item(
                &mut data.inventory,
                &mut data.transactions,
                &mut data.alerts,
                item_id,
            )?)
        })
    }

    pub fn record_movement(
        &mut self,
        item_id: &str,
        mut movement: StockMovement,
        now: DateTime<Utc>,
    ) -> Result<StockTransaction, ClientError> {
        self.require_manager(now)?;
        if movement.user_id.is_none() {
            movement.user_id = self.session.as_ref().map(|session| session.user.username.clone());
        }
        self.commit(Section::Stock, |data| {
            let item = data
                .inventory
                .iter_mut()
                .find(|item| item.id == item_id)
                .ok_or_else(|| CatalogError::NotFound {
                    entity: "Inventory item",
                    id: item_id.to_string(),
                })?;
            let transaction = record_stock_movement(item, movement, now)?;
            data.transactions.push(transaction.clone());
            data.refresh_alerts(now);
            Ok(transaction)
        })
    }

    pub fn acknowledge_alert(&mut self, alert_id: &str, now: DateTime<Utc>) -> Result<StockAlert, ClientError> {
        self.require_manager(now)?;
        self.commit(Section::Stock, |data| {
            if !alerts::acknowledge_alert(&mut data.alerts, alert_id) {
                return Err(CatalogError::NotFound {
                    entity: "Alert",
                    id: alert_id.to_string(),
                }
                .into());
            }
            Ok(get_by_id(&data.alerts, alert_id)?.clone())
        })
    }

    pub fn active_alerts(&self) -> Vec<StockAlert> {
        alerts::active_alerts(&self.data.alerts).cloned().collect()
    }

    pub fn report(&self, now: DateTime<Utc>) -> Result<InventoryReport, ClientError> {
        Ok(self.data.report(now)?)
    }

    pub fn export(&mut self, kind: ExportKind, now: DateTime<Utc>) -> Result<ExportFile, ClientError> {
        self.require_manager(now)?;
        Ok(ExportFile::build(kind, &self.data, now))
    }

    /// Merge an export document; nothing is stored unless it parses fully
    pub fn import(&mut self, json: &str, now: DateTime<Utc>) -> Result<ImportSummary, ClientError> {
        self.require_manager(now)?;
        let file = parse_import(json)?;
        self.commit(Section::All, |data| Ok(apply_import(data, file, now)))
    }

    pub fn summary(&self) -> DataSummary {
        self.data.summary()
    }
}
