//! Inventory management models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stock-tracked ingredient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    /// Join key against ingredient names (case-insensitive)
    pub name: String,
    pub current_stock: Decimal,
    pub unit: String,
    pub minimum_stock: Decimal,
    pub maximum_stock: Decimal,
    pub cost_per_unit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub last_restocked: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub category: InventoryCategory,
    pub is_active: bool,
}

impl InventoryItem {
    /// Value of the stock on hand, `None` if it does not fit a decimal
    pub fn stock_value(&self) -> Option<Decimal> {
        self.current_stock.checked_mul(self.cost_per_unit)
    }

    pub fn stock_status(&self) -> StockStatus {
        if self.current_stock <= Decimal::ZERO {
            StockStatus::Out
        } else if self.current_stock <= self.minimum_stock {
            StockStatus::Low
        } else if self.current_stock >= self.maximum_stock {
            StockStatus::Overstock
        } else {
            StockStatus::Normal
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < now)
    }
}

/// Inventory item categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InventoryCategory {
    Dairy,
    Flour,
    Sugar,
    Chocolate,
    Nuts,
    Fruits,
    Spices,
    #[default]
    Other,
}

impl std::fmt::Display for InventoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryCategory::Dairy => write!(f, "Dairy"),
            InventoryCategory::Flour => write!(f, "Flour & Grains"),
            InventoryCategory::Sugar => write!(f, "Sugar & Sweeteners"),
            InventoryCategory::Chocolate => write!(f, "Chocolate"),
            InventoryCategory::Nuts => write!(f, "Nuts & Seeds"),
            InventoryCategory::Fruits => write!(f, "Fruits"),
            InventoryCategory::Spices => write!(f, "Spices & Flavorings"),
            InventoryCategory::Other => write!(f, "Other"),
        }
    }
}

/// Stock level relative to the item's thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Out,
    Low,
    Normal,
    Overstock,
}

/// Types of stock transactions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Inbound,
    Outbound,
    Adjustment,
    Waste,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Inbound => "inbound",
            TransactionType::Outbound => "outbound",
            TransactionType::Adjustment => "adjustment",
            TransactionType::Waste => "waste",
        }
    }

    /// Whether the movement adds to stock
    pub fn is_inbound(&self) -> bool {
        matches!(self, TransactionType::Inbound)
    }
}

/// An immutable record of one stock movement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: String,
    pub inventory_item_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub unit: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Recipe usage attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
    /// How many items were made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_quantity: Option<Decimal>,
}

/// Alert types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowStock,
    Expired,
    ExpiringSoon,
    /// Accepted on import, never derived
    Overstock,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::LowStock => "low_stock",
            AlertType::Expired => "expired",
            AlertType::ExpiringSoon => "expiring_soon",
            AlertType::Overstock => "overstock",
        }
    }
}

/// Alert severity levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A derived notification about an inventory item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub id: String,
    pub inventory_item_id: String,
    pub item_name: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub severity: AlertSeverity,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}

/// Inventory report for the management dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub total_items: usize,
    pub low_stock_items: usize,
    pub expired_items: usize,
    pub total_value: Decimal,
    pub recent_transactions: Vec<StockTransaction>,
    pub alerts: Vec<StockAlert>,
}
