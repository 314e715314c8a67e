//! WebAssembly module for the Kitchen Recipe Calculator
//!
//! Provides client-side computation for:
//! - Recipe scaling and amount formatting
//! - Feasibility checks against an inventory
//! - The local-storage backed kitchen (sessions, production runs, export/import)
//! - Inventory, category and branding management for managers

use chrono::Utc;
use rust_decimal::Decimal;
use shared::ledger::NewInventoryItem;
use shared::scaling::{format_factor, round_for_display};
use shared::transfer::{export_file_name, ExportKind};
use wasm_bindgen::prelude::*;

mod client;
mod storage;

pub use client::{ClientError, KitchenClient};
pub use storage::LocalStorageStore;

// Re-export shared types for use in JavaScript
pub use shared::models::*;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn quantity(value: f64) -> Result<Decimal, JsValue> {
    Decimal::try_from(value).map_err(|e| JsValue::from_str(&format!("Invalid quantity {}: {}", value, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(to_js)
}

/// Scale a recipe given as JSON to a target quantity
#[wasm_bindgen]
pub fn scale_recipe_json(recipe_json: &str, target_quantity: f64) -> Result<String, JsValue> {
    let recipe: Recipe = serde_json::from_str(recipe_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid recipe JSON: {}", e)))?;
    let scaled = shared::scale_recipe(&recipe, quantity(target_quantity)?).map_err(to_js)?;
    to_json(&scaled)
}

/// Render an amount the way scaled recipes show it, e.g. `250 g`
#[wasm_bindgen]
pub fn format_amount(amount: f64, unit: &str) -> Result<String, JsValue> {
    Ok(shared::ScaledAmount::new(round_for_display(quantity(amount)?), unit).to_string())
}

/// Render a scaling factor, e.g. `2.00x`
#[wasm_bindgen]
pub fn format_scaling_factor(factor: f64) -> Result<String, JsValue> {
    Ok(format_factor(quantity(factor)?))
}

/// Check a recipe against an inventory list, both given as JSON
#[wasm_bindgen]
pub fn check_feasibility(recipe_json: &str, target_quantity: f64, inventory_json: &str) -> Result<String, JsValue> {
    let recipe: Recipe = serde_json::from_str(recipe_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid recipe JSON: {}", e)))?;
    let inventory: Vec<InventoryItem> = serde_json::from_str(inventory_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid inventory JSON: {}", e)))?;
    let result = shared::can_make_recipe(&recipe, quantity(target_quantity)?, &inventory).map_err(to_js)?;
    to_json(&result)
}

/// The kitchen backed by `window.localStorage`
#[wasm_bindgen]
pub struct KitchenApp {
    client: KitchenClient<LocalStorageStore>,
}

#[wasm_bindgen]
impl KitchenApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<KitchenApp, JsValue> {
        let store = LocalStorageStore::from_window().map_err(to_js)?;
        let client = KitchenClient::open(store, Utc::now()).map_err(to_js)?;
        Ok(Self { client })
    }

    /// Sign in and return the user as JSON
    pub fn login(&mut self, username: &str, password: &str) -> Result<String, JsValue> {
        let session = self.client.login(username, password, Utc::now()).map_err(to_js)?;
        to_json(&session.user)
    }

    pub fn logout(&mut self) -> Result<(), JsValue> {
        self.client.logout().map_err(to_js)
    }

    /// The signed-in user as JSON, if any
    pub fn current_user(&self) -> Result<Option<String>, JsValue> {
        self.client.session().map(|session| to_json(&session.user)).transpose()
    }

    pub fn is_privileged(&self) -> bool {
        self.client.session().is_some_and(|session| session.is_privileged())
    }

    pub fn recipes(&mut self, category_id: Option<String>) -> Result<String, JsValue> {
        let recipes = self
            .client
            .recipes(category_id.as_deref(), Utc::now())
            .map_err(to_js)?;
        to_json(&recipes)
    }

    pub fn categories(&self) -> Result<String, JsValue> {
        to_json(&self.client.data().categories)
    }

    pub fn brand_settings(&self) -> Result<String, JsValue> {
        to_json(&self.client.data().brand_settings)
    }

    pub fn scale(&mut self, recipe_id: &str, target_quantity: f64) -> Result<String, JsValue> {
        let scaled = self
            .client
            .scale(recipe_id, quantity(target_quantity)?, Utc::now())
            .map_err(to_js)?;
        to_json(&scaled)
    }

    pub fn can_make(&mut self, recipe_id: &str, target_quantity: f64) -> Result<String, JsValue> {
        let result = self
            .client
            .feasibility(recipe_id, quantity(target_quantity)?, Utc::now())
            .map_err(to_js)?;
        to_json(&result)
    }

    pub fn produce(&mut self, recipe_id: &str, target_quantity: f64) -> Result<String, JsValue> {
        let run = self
            .client
            .produce(recipe_id, quantity(target_quantity)?, Utc::now())
            .map_err(to_js)?;
        to_json(&run)
    }

    pub fn add_recipe(&mut self, recipe_json: &str) -> Result<String, JsValue> {
        let recipe: Recipe = serde_json::from_str(recipe_json).map_err(to_js)?;
        self.client.add_recipe(recipe, Utc::now()).map_err(to_js)
    }

    pub fn update_recipe(&mut self, recipe_json: &str) -> Result<(), JsValue> {
        let recipe: Recipe = serde_json::from_str(recipe_json).map_err(to_js)?;
        self.client.update_recipe(recipe, Utc::now()).map_err(to_js)
    }

    pub fn delete_recipe(&mut self, recipe_id: &str) -> Result<(), JsValue> {
        self.client.delete_recipe(recipe_id, Utc::now()).map(|_| ()).map_err(to_js)
    }

    pub fn add_category(&mut self, category_json: &str) -> Result<String, JsValue> {
        let category: Category = serde_json::from_str(category_json).map_err(to_js)?;
        self.client.add_category(category, Utc::now()).map_err(to_js)
    }

    pub fn update_category(&mut self, category_json: &str) -> Result<(), JsValue> {
        let category: Category = serde_json::from_str(category_json).map_err(to_js)?;
        self.client.update_category(category, Utc::now()).map_err(to_js)
    }

    pub fn delete_category(&mut self, category_id: &str) -> Result<(), JsValue> {
        self.client.delete_category(category_id, Utc::now()).map(|_| ()).map_err(to_js)
    }

    pub fn update_brand_settings(&mut self, settings_json: &str) -> Result<String, JsValue> {
        let settings: BrandSettings = serde_json::from_str(settings_json).map_err(to_js)?;
        let saved = self.client.update_brand_settings(settings, Utc::now()).map_err(to_js)?;
        to_json(&saved)
    }

    pub fn reset_brand_settings(&mut self) -> Result<String, JsValue> {
        to_json(&self.client.reset_brand_settings(Utc::now()).map_err(to_js)?)
    }

    pub fn apply_color_preset(&mut self, name: &str) -> Result<String, JsValue> {
        to_json(&self.client.apply_color_preset(name, Utc::now()).map_err(to_js)?)
    }

    pub fn color_presets(&self) -> Result<String, JsValue> {
        to_json(&COLOR_PRESETS)
    }

    pub fn inventory(&self) -> Result<String, JsValue> {
        to_json(&self.client.data().inventory)
    }

    /// Create an item from a JSON form and return it with its new id
    pub fn add_item(&mut self, item_json: &str) -> Result<String, JsValue> {
        let input: NewInventoryItem = serde_json::from_str(item_json).map_err(to_js)?;
        to_json(&self.client.add_item(input, Utc::now()).map_err(to_js)?)
    }

    pub fn update_item(&mut self, item_json: &str) -> Result<(), JsValue> {
        let item: InventoryItem = serde_json::from_str(item_json).map_err(to_js)?;
        self.client.update_item(item, Utc::now()).map_err(to_js)
    }

    pub fn delete_item(&mut self, item_id: &str) -> Result<(), JsValue> {
        self.client.delete_item(item_id, Utc::now()).map(|_| ()).map_err(to_js)
    }

    pub fn record_movement(&mut self, item_id: &str, movement_json: &str) -> Result<String, JsValue> {
        let movement = serde_json::from_str(movement_json).map_err(to_js)?;
        let transaction = self
            .client
            .record_movement(item_id, movement, Utc::now())
            .map_err(to_js)?;
        to_json(&transaction)
    }

    pub fn alerts(&self) -> Result<String, JsValue> {
        to_json(&self.client.active_alerts())
    }

    pub fn acknowledge_alert(&mut self, alert_id: &str) -> Result<(), JsValue> {
        self.client.acknowledge_alert(alert_id, Utc::now()).map(|_| ()).map_err(to_js)
    }

    pub fn report(&self) -> Result<String, JsValue> {
        to_json(&self.client.report(Utc::now()).map_err(to_js)?)
    }

    /// Export as a pretty-printed document; `kind` is `complete`,
    /// `recipes-only` or `inventory-only`
    pub fn export_data(&mut self, kind: &str) -> Result<String, JsValue> {
        let kind: ExportKind = kind.parse().map_err(to_js)?;
        let file = self.client.export(kind, Utc::now()).map_err(to_js)?;
        let json = file.to_json_pretty().map_err(to_js)?;
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "Exported {} data ({} bytes)",
            kind.as_str(),
            json.len()
        )));
        Ok(json)
    }

    pub fn export_file_name(&self, kind: &str) -> Result<String, JsValue> {
        let kind: ExportKind = kind.parse().map_err(to_js)?;
        Ok(export_file_name(kind, Utc::now()))
    }

    /// Merge an export document and return the merge statistics as JSON
    pub fn import_data(&mut self, json: &str) -> Result<String, JsValue> {
        match self.client.import(json, Utc::now()) {
            Ok(summary) => {
                web_sys::console::log_1(&JsValue::from_str(&format!(
                    "Imported {} recipes, {} inventory items",
                    summary.recipes.added + summary.recipes.replaced,
                    summary.inventory.added + summary.inventory.replaced
                )));
                to_json(&summary)
            }
            Err(err) => {
                web_sys::console::error_1(&JsValue::from_str(&format!("Import failed: {}", err)));
                Err(to_js(err))
            }
        }
    }

    pub fn summary(&self) -> Result<String, JsValue> {
        to_json(&self.client.summary())
    }
}
