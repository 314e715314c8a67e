//! Export, import and data summary

use chrono::Utc;
use shared::transfer::{apply_import, parse_import, ExportFile, ExportKind, ImportSummary};
use shared::DataSummary;

use crate::error::AppResult;
use crate::storage::{KitchenStore, Scope};

#[derive(Clone)]
pub struct DataService {
    store: KitchenStore,
}

impl DataService {
    pub fn new(store: KitchenStore) -> Self {
        Self { store }
    }

    pub async fn export(&self, kind: ExportKind) -> AppResult<ExportFile> {
        let data = self.store.snapshot(Scope::All).await?;
        let file = ExportFile::build(kind, &data, Utc::now());

        tracing::info!(export_type = kind.as_str(), "Data exported");
        Ok(file)
    }

    /// Merge an export document into the stored data
    ///
    /// The document is fully parsed before any collection is touched.
    pub async fn import(&self, json: &str) -> AppResult<ImportSummary> {
        let file = parse_import(json).map_err(|err| {
            tracing::warn!(error = %err, "Import rejected");
            err
        })?;
        let kind = file.kind;

        let mut tx = self.store.begin(Scope::All).await?;
        let summary = apply_import(&mut tx.data, file, Utc::now());
        tx.commit().await?;

        tracing::info!(
            import_type = kind.as_str(),
            recipes_added = summary.recipes.added,
            recipes_replaced = summary.recipes.replaced,
            inventory_added = summary.inventory.added,
            inventory_replaced = summary.inventory.replaced,
            "Data imported"
        );
        Ok(summary)
    }

    pub async fn summary(&self) -> AppResult<DataSummary> {
        Ok(self.store.snapshot(Scope::All).await?.summary())
    }
}
