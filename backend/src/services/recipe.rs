//! Recipe catalog, scaling and production runs

use chrono::Utc;
use rust_decimal::Decimal;
use shared::catalog::{self, find_by_id, get_by_id};
use shared::{
    can_make_recipe, scale_recipe, CatalogError, Feasibility, KitchenData, ProductionRun, Recipe, ScaledRecipe,
};

use crate::error::AppResult;
use crate::storage::{KitchenStore, Scope};

/// Recipe service
#[derive(Clone)]
pub struct RecipeService {
    store: KitchenStore,
}

impl RecipeService {
    pub fn new(store: KitchenStore) -> Self {
        Self { store }
    }

    /// List recipes, optionally only those in one category
    pub async fn list_recipes(&self, category_id: Option<&str>) -> AppResult<Vec<Recipe>> {
        let data = self.store.snapshot(Scope::Catalog).await?;
        Ok(match category_id {
            Some(category_id) => catalog::recipes_in_category(&data.recipes, category_id)
                .cloned()
                .collect(),
            None => data.recipes,
        })
    }

    pub async fn get_recipe(&self, recipe_id: &str) -> AppResult<Recipe> {
        let data = self.store.snapshot(Scope::Catalog).await?;
        Ok(get_by_id(&data.recipes, recipe_id)?.clone())
    }

    pub async fn create_recipe(&self, recipe: Recipe) -> AppResult<Recipe> {
        let mut tx = self.store.begin(Scope::Catalog).await?;
        ensure_category(&tx.data, &recipe.category_id)?;
        let recipe_id = catalog::add_recipe(&mut tx.data.recipes, recipe)?;
        let data = tx.commit().await?;

        tracing::info!(recipe_id = %recipe_id, "Recipe created");
        Ok(get_by_id(&data.recipes, &recipe_id)?.clone())
    }

    pub async fn update_recipe(&self, recipe_id: &str, mut recipe: Recipe) -> AppResult<Recipe> {
        recipe.id = recipe_id.to_string();
        let mut tx = self.store.begin(Scope::Catalog).await?;
        ensure_category(&tx.data, &recipe.category_id)?;
        catalog::update_recipe(&mut tx.data.recipes, recipe.clone())?;
        tx.commit().await?;

        tracing::info!(recipe_id = %recipe_id, "Recipe updated");
        Ok(recipe)
    }

    pub async fn delete_recipe(&self, recipe_id: &str) -> AppResult<Recipe> {
        let mut tx = self.store.begin(Scope::Catalog).await?;
        let removed = catalog::remove(&mut tx.data.recipes, recipe_id)?;
        tx.commit().await?;

        tracing::info!(recipe_id = %recipe_id, "Recipe deleted");
        Ok(removed)
    }

    /// Scaled quantities for a target number of items
    pub async fn scale(&self, recipe_id: &str, quantity: Decimal) -> AppResult<ScaledRecipe> {
        let recipe = self.get_recipe(recipe_id).await?;
        Ok(scale_recipe(&recipe, quantity)?)
    }

    /// Whether current stock covers a run of `quantity` items
    pub async fn feasibility(&self, recipe_id: &str, quantity: Decimal) -> AppResult<Feasibility> {
        let data = self.store.snapshot(Scope::All).await?;
        let recipe = get_by_id(&data.recipes, recipe_id)?;
        Ok(can_make_recipe(recipe, quantity, &data.inventory)?)
    }

    /// Deduct a production run from stock
    pub async fn produce(&self, recipe_id: &str, target_quantity: Decimal, username: &str) -> AppResult<ProductionRun> {
        let catalog = self.store.snapshot(Scope::Catalog).await?;
        let mut tx = self.store.begin(Scope::Stock).await?;
        tx.data.recipes = catalog.recipes;

        let run = tx.data.produce(recipe_id, target_quantity, Utc::now())?;
        tx.commit().await?;

        tracing::info!(
            recipe_id = %recipe_id,
            target_quantity = %target_quantity,
            transactions = run.transactions.len(),
            new_alerts = run.new_alerts.len(),
            username = %username,
            "Production run recorded"
        );
        Ok(run)
    }
}

fn ensure_category(data: &KitchenData, category_id: &str) -> Result<(), CatalogError> {
    match find_by_id(&data.categories, category_id) {
        Some(_) => Ok(()),
        None => Err(CatalogError::validation(
            "categoryId",
            format!("Unknown category {}", category_id),
        )),
    }
}
