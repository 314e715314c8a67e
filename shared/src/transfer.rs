//! JSON export and import of application data
//!
//! Exports are versioned documents carrying `version`, `appName`,
//! `exportDate`, `type` and the collections for that type. Imports are
//! fully parsed and checked before anything is merged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{merge_by_id, MergeStats};
use crate::error::ImportError;
use crate::kitchen::KitchenData;
use crate::models::{BrandSettings, Category, InventoryItem, Recipe, StockAlert, StockTransaction};

pub const EXPORT_VERSION: &str = "1.0";
pub const APP_NAME: &str = "Kitchen Recipe Calculator";

/// Which collections an export carries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    #[default]
    Complete,
    RecipesOnly,
    InventoryOnly,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Complete => "complete",
            ExportKind::RecipesOnly => "recipes-only",
            ExportKind::InventoryOnly => "inventory-only",
        }
    }

    fn includes_recipes(&self) -> bool {
        matches!(self, ExportKind::Complete | ExportKind::RecipesOnly)
    }

    fn includes_inventory(&self) -> bool {
        matches!(self, ExportKind::Complete | ExportKind::InventoryOnly)
    }
}

impl std::str::FromStr for ExportKind {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complete" => Ok(ExportKind::Complete),
            "recipes-only" => Ok(ExportKind::RecipesOnly),
            "inventory-only" => Ok(ExportKind::InventoryOnly),
            other => Err(ImportError::UnsupportedType(other.to_string())),
        }
    }
}

/// An export document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub version: String,
    pub app_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: ExportKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<Recipe>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_settings: Option<BrandSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<InventoryItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<StockTransaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<StockAlert>>,
}

impl ExportFile {
    pub fn build(kind: ExportKind, data: &KitchenData, now: DateTime<Utc>) -> Self {
        let recipes = kind.includes_recipes();
        let inventory = kind.includes_inventory();
        Self {
            version: EXPORT_VERSION.to_string(),
            app_name: APP_NAME.to_string(),
            export_date: Some(now),
            kind,
            recipes: recipes.then(|| data.recipes.clone()),
            categories: recipes.then(|| data.categories.clone()),
            brand_settings: (kind == ExportKind::Complete).then(|| data.brand_settings.clone()),
            inventory: inventory.then(|| data.inventory.clone()),
            transactions: inventory.then(|| data.transactions.clone()),
            alerts: inventory.then(|| data.alerts.clone()),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Suggested download name, e.g. `recipe-calculator-complete-2024-05-01.json`
pub fn export_file_name(kind: ExportKind, now: DateTime<Utc>) -> String {
    format!("recipe-calculator-{}-{}.json", kind.as_str(), now.format("%Y-%m-%d"))
}

/// Parse and check an import document
pub fn parse_import(json: &str) -> Result<ExportFile, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    let has_text = |field: &str| {
        value
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|text| !text.is_empty())
    };
    if !has_text("version") {
        return Err(ImportError::MissingField("version"));
    }
    if !has_text("appName") {
        return Err(ImportError::MissingField("appName"));
    }
    match value.get("type").and_then(Value::as_str) {
        Some(kind) => kind.parse::<ExportKind>()?,
        None => return Err(ImportError::MissingField("type")),
    };
    Ok(serde_json::from_value(value)?)
}

/// Per-collection outcome of an import
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub recipes: MergeStats,
    pub categories: MergeStats,
    pub brand_settings_replaced: bool,
    pub inventory: MergeStats,
    pub transactions: MergeStats,
    pub alerts: MergeStats,
}

impl ImportSummary {
    pub fn touches_recipes(&self) -> bool {
        self.recipes != MergeStats::default() || self.categories != MergeStats::default()
    }

    pub fn touches_inventory(&self) -> bool {
        self.inventory != MergeStats::default()
            || self.transactions != MergeStats::default()
            || self.alerts != MergeStats::default()
    }
}

/// Merge an import into the data set
///
/// Collections outside the document's type are ignored even if present.
pub fn apply_import(data: &mut KitchenData, file: ExportFile, now: DateTime<Utc>) -> ImportSummary {
    let mut summary = ImportSummary::default();
    let kind = file.kind;

    if kind.includes_recipes() {
        if let Some(recipes) = file.recipes {
            summary.recipes = merge_by_id(&mut data.recipes, recipes);
        }
        if let Some(categories) = file.categories {
            summary.categories = merge_by_id(&mut data.categories, categories);
        }
    }
    if kind == ExportKind::Complete {
        if let Some(settings) = file.brand_settings {
            data.brand_settings = settings;
            summary.brand_settings_replaced = true;
        }
    }
    if kind.includes_inventory() {
        if let Some(inventory) = file.inventory {
            summary.inventory = merge_by_id(&mut data.inventory, inventory);
        }
        if let Some(transactions) = file.transactions {
            summary.transactions = merge_by_id(&mut data.transactions, transactions);
        }
        if let Some(alerts) = file.alerts {
            summary.alerts = merge_by_id(&mut data.alerts, alerts);
        }
        if summary.touches_inventory() {
            data.refresh_alerts(now);
        }
    }
    summary
}
