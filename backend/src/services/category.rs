//! Recipe category management

use shared::catalog::{self, get_by_id};
use shared::Category;

use crate::error::AppResult;
use crate::storage::{KitchenStore, Scope};

#[derive(Clone)]
pub struct CategoryService {
    store: KitchenStore,
}

impl CategoryService {
    pub fn new(store: KitchenStore) -> Self {
        Self { store }
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.store.snapshot(Scope::Catalog).await?.categories)
    }

    pub async fn create_category(&self, category: Category) -> AppResult<Category> {
        let mut tx = self.store.begin(Scope::Catalog).await?;
        let category_id = catalog::add_category(&mut tx.data.categories, category)?;
        let data = tx.commit().await?;

        tracing::info!(category_id = %category_id, "Category created");
        Ok(get_by_id(&data.categories, &category_id)?.clone())
    }

    pub async fn update_category(&self, category_id: &str, mut category: Category) -> AppResult<Category> {
        category.id = category_id.to_string();
        let mut tx = self.store.begin(Scope::Catalog).await?;
        catalog::update_category(&mut tx.data.categories, category.clone())?;
        tx.commit().await?;
        Ok(category)
    }

    /// Delete a category no recipe belongs to
    pub async fn delete_category(&self, category_id: &str) -> AppResult<Category> {
        let mut tx = self.store.begin(Scope::Catalog).await?;
        let data = &mut tx.data;
        let removed = catalog::delete_category(&mut data.categories, &data.recipes, category_id)?;
        tx.commit().await?;

        tracing::info!(category_id = %category_id, "Category deleted");
        Ok(removed)
    }
}
