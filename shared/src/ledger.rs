//! Inventory items and the stock transaction ledger
//!
//! The ledger is append-only and kept in the order movements happened.
//! "Most recent first" is a view over it, see [`recent_first`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::alerts::active_alerts;
use crate::catalog;
use crate::error::{CatalogError, ScalingError};
use crate::models::{
    InventoryCategory, InventoryItem, InventoryReport, StockAlert, StockTransaction, TransactionType,
};
use crate::validation::validate_inventory_item;

/// Number of transactions shown on the report
pub const RECENT_TRANSACTION_LIMIT: usize = 10;

/// Input for creating an inventory item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub name: String,
    #[serde(default)]
    pub current_stock: Decimal,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub minimum_stock: Decimal,
    #[serde(default = "default_maximum_stock")]
    pub maximum_stock: Decimal,
    #[serde(default)]
    pub cost_per_unit: Decimal,
    pub supplier: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    #[serde(default)]
    pub category: InventoryCategory,
}

fn default_unit() -> String {
    "g".to_string()
}

fn default_maximum_stock() -> Decimal {
    Decimal::from(1000)
}

impl NewInventoryItem {
    pub fn into_item(self, now: DateTime<Utc>) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            current_stock: self.current_stock,
            unit: self.unit,
            minimum_stock: self.minimum_stock,
            maximum_stock: self.maximum_stock,
            cost_per_unit: self.cost_per_unit,
            supplier: self.supplier,
            last_restocked: now,
            expiry_date: self.expiry_date,
            location: self.location,
            category: self.category,
            is_active: true,
        }
    }
}

/// A manual stock movement entered by a manager
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    #[serde(default)]
    pub reason: String,
    pub cost: Option<Decimal>,
    pub supplier: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub user_id: Option<String>,
}

pub fn add_item(inventory: &mut Vec<InventoryItem>, item: InventoryItem) -> Result<(), CatalogError> {
    validate_inventory_item(&item)?;
    catalog::insert(inventory, item)
}

pub fn update_item(inventory: &mut [InventoryItem], item: InventoryItem) -> Result<(), CatalogError> {
    validate_inventory_item(&item)?;
    catalog::replace(inventory, item)
}

/// Delete an item together with its transactions and alerts
pub fn delete_item(
    inventory: &mut Vec<InventoryItem>,
    transactions: &mut Vec<StockTransaction>,
    alerts: &mut Vec<StockAlert>,
    item_id: &str,
) -> Result<InventoryItem, CatalogError> {
    let removed = catalog::remove(inventory, item_id)?;
    transactions.retain(|transaction| transaction.inventory_item_id != item_id);
    alerts.retain(|alert| alert.inventory_item_id != item_id);
    Ok(removed)
}

/// Apply a manual movement to an item and return its ledger entry
///
/// Inbound adds stock and stamps `last_restocked`; every other type
/// subtracts. This path does not clamp.
pub fn record_stock_movement(
    item: &mut InventoryItem,
    movement: StockMovement,
    now: DateTime<Utc>,
) -> Result<StockTransaction, CatalogError> {
    if movement.quantity <= Decimal::ZERO {
        return Err(CatalogError::validation("quantity", "Quantity must be positive"));
    }

    let too_large = || CatalogError::validation("quantity", "Quantity is too large");
    if movement.transaction_type.is_inbound() {
        item.current_stock = item.current_stock.checked_add(movement.quantity).ok_or_else(too_large)?;
        item.last_restocked = now;
    } else {
        item.current_stock = item.current_stock.checked_sub(movement.quantity).ok_or_else(too_large)?;
    }

    Ok(StockTransaction {
        id: Uuid::new_v4().to_string(),
        inventory_item_id: item.id.clone(),
        transaction_type: movement.transaction_type,
        quantity: movement.quantity,
        unit: item.unit.clone(),
        reason: movement.reason,
        cost: movement.cost,
        supplier: movement.supplier,
        batch_number: movement.batch_number,
        expiry_date: movement.expiry_date,
        timestamp: now,
        user_id: movement.user_id,
        recipe_id: None,
        recipe_name: None,
        target_quantity: None,
    })
}

/// Transactions for display, newest first
pub fn recent_first(transactions: &[StockTransaction]) -> impl Iterator<Item = &StockTransaction> {
    transactions.iter().rev()
}

pub fn inventory_report(
    inventory: &[InventoryItem],
    transactions: &[StockTransaction],
    alerts: &[StockAlert],
    now: DateTime<Utc>,
) -> Result<InventoryReport, ScalingError> {
    let total_value = inventory.iter().try_fold(Decimal::ZERO, |total, item| {
        item.stock_value()
            .and_then(|value| total.checked_add(value))
            .ok_or(ScalingError::Overflow(item.current_stock))
    })?;

    Ok(InventoryReport {
        total_items: inventory.len(),
        low_stock_items: inventory
            .iter()
            .filter(|item| item.current_stock <= item.minimum_stock)
            .count(),
        expired_items: inventory.iter().filter(|item| item.is_expired(now)).count(),
        total_value,
        recent_transactions: recent_first(transactions)
            .take(RECENT_TRANSACTION_LIMIT)
            .cloned()
            .collect(),
        alerts: active_alerts(alerts).cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StockStatus;

    fn new_item(name: &str, stock: i64) -> InventoryItem {
        NewInventoryItem {
            name: name.into(),
            current_stock: Decimal::from(stock),
            unit: "g".into(),
            minimum_stock: Decimal::from(50),
            maximum_stock: Decimal::from(1000),
            cost_per_unit: Decimal::new(2, 2),
            supplier: None,
            expiry_date: None,
            location: None,
            category: InventoryCategory::Dairy,
        }
        .into_item(Utc::now())
    }

    fn movement(transaction_type: TransactionType, quantity: i64) -> StockMovement {
        StockMovement {
            transaction_type,
            quantity: Decimal::from(quantity),
            reason: "count".into(),
            cost: None,
            supplier: None,
            batch_number: None,
            expiry_date: None,
            user_id: None,
        }
    }

    #[test]
    fn test_inbound_movement_restocks() {
        let mut item = new_item("Butter", 10);
        let before = item.last_restocked;
        let later = before + chrono::Duration::minutes(5);
        let txn = record_stock_movement(&mut item, movement(TransactionType::Inbound, 40), later).unwrap();
        assert_eq!(item.current_stock, Decimal::from(50));
        assert_eq!(item.last_restocked, later);
        assert_eq!(txn.inventory_item_id, item.id);
        assert_eq!(txn.unit, "g");
    }

    #[test]
    fn test_waste_movement_is_not_clamped() {
        let mut item = new_item("Butter", 10);
        record_stock_movement(&mut item, movement(TransactionType::Waste, 15), Utc::now()).unwrap();
        assert_eq!(item.current_stock, Decimal::from(-5));
        assert_eq!(item.stock_status(), StockStatus::Out);
    }

    #[test]
    fn test_movement_requires_positive_quantity() {
        let mut item = new_item("Butter", 10);
        assert!(record_stock_movement(&mut item, movement(TransactionType::Outbound, 0), Utc::now()).is_err());
        assert_eq!(item.current_stock, Decimal::from(10));
    }

    #[test]
    fn test_delete_item_cascades() {
        let butter = new_item("Butter", 10);
        let flour = new_item("Flour", 500);
        let butter_id = butter.id.clone();
        let mut inventory = vec![butter, flour];
        let mut transactions = Vec::new();
        let mut alerts = Vec::new();
        for item in inventory.iter_mut() {
            transactions.push(record_stock_movement(item, movement(TransactionType::Inbound, 1), Utc::now()).unwrap());
        }
        crate::alerts::refresh_alerts(&inventory, &mut alerts, Utc::now());
        assert_eq!(alerts.len(), 1);

        delete_item(&mut inventory, &mut transactions, &mut alerts, &butter_id).unwrap();
        assert_eq!(inventory.len(), 1);
        assert_eq!(transactions.len(), 1);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_inventory_report() {
        let mut low = new_item("Butter", 10);
        low.expiry_date = Some(Utc::now() - chrono::Duration::days(1));
        let inventory = vec![low, new_item("Flour", 500)];
        let mut transactions = Vec::new();
        for n in 0..12 {
            let mut item = inventory[1].clone();
            let mut txn = record_stock_movement(&mut item, movement(TransactionType::Outbound, 1), Utc::now()).unwrap();
            txn.reason = format!("line {}", n);
            transactions.push(txn);
        }

        let report = inventory_report(&inventory, &transactions, &[], Utc::now()).unwrap();
        assert_eq!(report.total_items, 2);
        assert_eq!(report.low_stock_items, 1);
        assert_eq!(report.expired_items, 1);
        assert_eq!(report.total_value, Decimal::new(1020, 2));
        assert_eq!(report.recent_transactions.len(), RECENT_TRANSACTION_LIMIT);
        assert_eq!(report.recent_transactions[0].reason, "line 11");
    }

    #[test]
    fn test_movement_overflow_leaves_stock_alone() {
        let mut item = new_item("Butter", 10);
        let mut huge = movement(TransactionType::Inbound, 0);
        huge.quantity = Decimal::MAX;
        assert!(matches!(
            record_stock_movement(&mut item, huge, Utc::now()),
            Err(CatalogError::Validation { .. })
        ));
        assert_eq!(item.current_stock, Decimal::from(10));
    }

    #[test]
    fn test_inventory_report_value_overflow() {
        let mut hoard = new_item("Saffron", 0);
        hoard.current_stock = Decimal::MAX;
        hoard.cost_per_unit = Decimal::from(2);
        assert!(matches!(
            inventory_report(&[hoard], &[], &[], Utc::now()),
            Err(ScalingError::Overflow(_))
        ));
    }
}
