//! Inventory management service for stock items, movements and alerts
//!
//! Every mutation re-derives alerts and persists them in the same
//! transaction as the stock change.

use chrono::Utc;
use serde::Deserialize;
use shared::alerts::{acknowledge_alert, active_alerts};
use shared::catalog::get_by_id;
use shared::ledger::{self, recent_first, NewInventoryItem, StockMovement};
use shared::{CatalogError, InventoryItem, InventoryReport, StockAlert, StockTransaction};

use crate::error::AppResult;
use crate::storage::{KitchenStore, Scope};

/// Inventory service for managing stock items, transactions and alerts
#[derive(Clone)]
pub struct InventoryService {
    store: KitchenStore,
}

/// Filters for the transaction list
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub item_id: Option<String>,
    pub recipe_id: Option<String>,
    pub limit: Option<usize>,
}

impl InventoryService {
    pub fn new(store: KitchenStore) -> Self {
        Self { store }
    }

    pub async fn list_items(&self) -> AppResult<Vec<InventoryItem>> {
        Ok(self.store.snapshot(Scope::Stock).await?.inventory)
    }

    pub async fn get_item(&self, item_id: &str) -> AppResult<InventoryItem> {
        let data = self.store.snapshot(Scope::Stock).await?;
        Ok(get_by_id(&data.inventory, item_id)?.clone())
    }

    pub async fn create_item(&self, input: NewInventoryItem) -> AppResult<InventoryItem> {
        let now = Utc::now();
        let item = input.into_item(now);
        let item_id = item.id.clone();

        let mut tx = self.store.begin(Scope::Stock).await?;
        ledger::add_item(&mut tx.data.inventory, item)?;
        tx.data.refresh_alerts(now);
        let data = tx.commit().await?;

        tracing::info!(item_id = %item_id, "Inventory item created");
        Ok(get_by_id(&data.inventory, &item_id)?.clone())
    }

    pub async fn update_item(&self, item_id: &str, mut item: InventoryItem) -> AppResult<InventoryItem> {
        item.id = item_id.to_string();
        let mut tx = self.store.begin(Scope::Stock).await?;
        ledger::update_item(&mut tx.data.inventory, item.clone())?;
        tx.data.refresh_alerts(Utc::now());
        tx.commit().await?;

        tracing::info!(item_id = %item_id, "Inventory item updated");
        Ok(item)
    }

    /// Delete an item along with its transactions and alerts
    pub async fn delete_item(&self, item_id: &str) -> AppResult<InventoryItem> {
        let mut tx = self.store.begin(Scope::Stock).await?;
        let data = &mut tx.data;
        let removed = ledger::delete_item(&mut data.inventory, &mut data.transactions, &mut data.alerts, item_id)?;
        tx.commit().await?;

        tracing::info!(item_id = %item_id, "Inventory item deleted");
        Ok(removed)
    }

    /// Apply a manual stock movement
    pub async fn record_movement(
        &self,
        item_id: &str,
        mut movement: StockMovement,
        username: &str,
    ) -> AppResult<StockTransaction> {
        let now = Utc::now();
        movement.user_id.get_or_insert_with(|| username.to_string());

        let mut tx = self.store.begin(Scope::Stock).await?;
        let item = tx
            .data
            .inventory
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| CatalogError::NotFound {
                entity: "Inventory item",
                id: item_id.to_string(),
            })?;
        let transaction = ledger::record_stock_movement(item, movement, now)?;
        tx.data.transactions.push(transaction.clone());
        tx.data.refresh_alerts(now);
        tx.commit().await?;

        tracing::info!(
            item_id = %item_id,
            transaction_type = transaction.transaction_type.as_str(),
            quantity = %transaction.quantity,
            "Stock movement recorded"
        );
        Ok(transaction)
    }

    /// Transactions, most recent first
    pub async fn list_transactions(&self, filter: TransactionFilter) -> AppResult<Vec<StockTransaction>> {
        let data = self.store.snapshot(Scope::Stock).await?;
        let matching = recent_first(&data.transactions)
            .filter(|t| filter.item_id.as_deref().map_or(true, |id| t.inventory_item_id == id))
            .filter(|t| {
                filter
                    .recipe_id
                    .as_deref()
                    .map_or(true, |id| t.recipe_id.as_deref() == Some(id))
            })
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(matching)
    }

    pub async fn list_alerts(&self, include_acknowledged: bool) -> AppResult<Vec<StockAlert>> {
        let data = self.store.snapshot(Scope::Stock).await?;
        if include_acknowledged {
            Ok(data.alerts)
        } else {
            Ok(active_alerts(&data.alerts).cloned().collect())
        }
    }

    pub async fn acknowledge_alert(&self, alert_id: &str) -> AppResult<StockAlert> {
        let mut tx = self.store.begin(Scope::Stock).await?;
        if !acknowledge_alert(&mut tx.data.alerts, alert_id) {
            return Err(CatalogError::NotFound {
                entity: "Alert",
                id: alert_id.to_string(),
            }
            .into());
        }
        let data = tx.commit().await?;
        Ok(get_by_id(&data.alerts, alert_id)?.clone())
    }

    pub async fn report(&self) -> AppResult<InventoryReport> {
        let data = self.store.snapshot(Scope::Stock).await?;
        Ok(data.report(Utc::now())?)
    }
}
