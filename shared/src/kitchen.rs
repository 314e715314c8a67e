//! The full application data set and the operations that span collections

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::alerts;
use crate::catalog::get_by_id;
use crate::error::{KitchenError, ScalingError};
use crate::ledger::inventory_report;
use crate::models::{
    BrandSettings, Category, InventoryItem, InventoryReport, Recipe, StockAlert, StockTransaction,
};
use crate::reconciliation::process_recipe_usage;
use crate::seed;

/// Every persisted collection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KitchenData {
    pub recipes: Vec<Recipe>,
    pub categories: Vec<Category>,
    pub brand_settings: BrandSettings,
    pub inventory: Vec<InventoryItem>,
    pub transactions: Vec<StockTransaction>,
    pub alerts: Vec<StockAlert>,
}

/// Outcome of a committed production run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRun {
    pub recipe_id: String,
    pub target_quantity: Decimal,
    pub transactions: Vec<StockTransaction>,
    pub new_alerts: Vec<StockAlert>,
}

/// Record counts, shown before exporting
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataSummary {
    pub recipes: usize,
    pub categories: usize,
    pub inventory_items: usize,
    pub transactions: usize,
    pub alerts: usize,
    pub active_alerts: usize,
}

impl KitchenData {
    /// Fresh data set with the bundled recipes and categories
    pub fn with_defaults() -> Self {
        Self {
            recipes: seed::default_recipes(),
            categories: seed::default_categories(),
            ..Self::default()
        }
    }

    /// Append alerts for the current inventory. Returns how many were added.
    pub fn refresh_alerts(&mut self, now: DateTime<Utc>) -> usize {
        alerts::refresh_alerts(&self.inventory, &mut self.alerts, now)
    }

    /// Deduct a run of `target_quantity` units of a recipe from stock
    ///
    /// The inventory replacement and the ledger append happen together;
    /// on error nothing is changed.
    pub fn produce(
        &mut self,
        recipe_id: &str,
        target_quantity: Decimal,
        now: DateTime<Utc>,
    ) -> Result<ProductionRun, KitchenError> {
        let recipe = get_by_id(&self.recipes, recipe_id)?;
        let usage = process_recipe_usage(recipe, target_quantity, &self.inventory, now)?;

        self.inventory = usage.updated_inventory;
        self.transactions.extend(usage.new_transactions.iter().cloned());
        let before = self.alerts.len();
        self.refresh_alerts(now);

        Ok(ProductionRun {
            recipe_id: recipe_id.to_string(),
            target_quantity,
            transactions: usage.new_transactions,
            new_alerts: self.alerts[before..].to_vec(),
        })
    }

    pub fn report(&self, now: DateTime<Utc>) -> Result<InventoryReport, ScalingError> {
        inventory_report(&self.inventory, &self.transactions, &self.alerts, now)
    }

    pub fn summary(&self) -> DataSummary {
        DataSummary {
            recipes: self.recipes.len(),
            categories: self.categories.len(),
            inventory_items: self.inventory.len(),
            transactions: self.transactions.len(),
            alerts: self.alerts.len(),
            active_alerts: alerts::active_alerts(&self.alerts).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::ledger::NewInventoryItem;
    use crate::models::{AlertType, InventoryCategory};

    fn stocked(name: &str, stock: i64, minimum: i64) -> InventoryItem {
        NewInventoryItem {
            name: name.into(),
            current_stock: Decimal::from(stock),
            unit: "g".into(),
            minimum_stock: Decimal::from(minimum),
            maximum_stock: Decimal::from(5000),
            cost_per_unit: Decimal::ZERO,
            supplier: None,
            expiry_date: None,
            location: None,
            category: InventoryCategory::Other,
        }
        .into_item(Utc::now())
    }

    #[test]
    fn test_produce_updates_stock_ledger_and_alerts() {
        let mut data = KitchenData::with_defaults();
        data.inventory = vec![stocked("Plain flour", 700, 100), stocked("Caster sugar", 200, 50)];

        let run = data
            .produce("raspberry-caramel-white-chocolate", Decimal::from(10), Utc::now())
            .unwrap();

        // flour 300g x2, caster sugar 75g x2 plus 35g x2 in the caramel
        assert_eq!(data.inventory[0].current_stock, Decimal::from(100));
        assert_eq!(data.inventory[1].current_stock, Decimal::ZERO);
        assert_eq!(run.transactions.len(), 3);
        assert_eq!(data.transactions.len(), 3);

        let types: Vec<AlertType> = run.new_alerts.iter().map(|alert| alert.alert_type).collect();
        assert_eq!(types, vec![AlertType::LowStock, AlertType::LowStock]);
        assert_eq!(data.summary().active_alerts, 2);
    }

    #[test]
    fn test_produce_rejects_unknown_recipe_and_negative_target() {
        let mut data = KitchenData::with_defaults();
        data.inventory = vec![stocked("Plain flour", 700, 100)];
        let snapshot = data.clone();

        assert!(matches!(
            data.produce("missing", Decimal::ONE, Utc::now()),
            Err(KitchenError::Catalog(CatalogError::NotFound { .. }))
        ));
        assert!(matches!(
            data.produce("lemon-meringue", Decimal::from(-1), Utc::now()),
            Err(KitchenError::Scaling(ScalingError::NegativeTarget(_)))
        ));
        assert_eq!(data, snapshot);
    }

    #[test]
    fn test_summary_counts() {
        let data = KitchenData::with_defaults();
        let summary = data.summary();
        assert_eq!(summary.recipes, 3);
        assert_eq!(summary.categories, 4);
        assert_eq!(summary.inventory_items, 0);
    }
}
