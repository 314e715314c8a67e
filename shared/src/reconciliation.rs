//! Inventory reconciliation for production runs
//!
//! Ingredient lines are joined to inventory items by name, compared
//! case-insensitively. Lines without a matching item are not stock-tracked:
//! the feasibility check reports them as missing and the deduction skips
//! them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ScalingError;
use crate::models::{IngredientLine, InventoryItem, Recipe, StockTransaction, TransactionType};
use crate::scaling::{scaled, scaling_factor};

/// Find the first inventory item whose name matches, ignoring case
pub fn find_inventory_item<'a>(inventory: &'a [InventoryItem], name: &str) -> Option<&'a InventoryItem> {
    inventory.iter().find(|item| names_match(&item.name, name))
}

fn find_inventory_index(inventory: &[InventoryItem], name: &str) -> Option<usize> {
    inventory.iter().position(|item| names_match(&item.name, name))
}

fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Outcome of a feasibility check
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Feasibility {
    pub feasible: bool,
    /// Labels of short or untracked ingredients, first occurrence order
    pub missing: Vec<String>,
}

/// Check whether current stock covers a production run
///
/// Required amounts use the unrounded scaling factor.
pub fn can_make_recipe(
    recipe: &Recipe,
    target_quantity: Decimal,
    inventory: &[InventoryItem],
) -> Result<Feasibility, ScalingError> {
    let factor = scaling_factor(recipe, target_quantity)?;
    let mut missing: Vec<String> = Vec::new();

    for line in recipe.ingredient_lines() {
        let required = scaled(line.ingredient.amount, factor)?;
        let covered = find_inventory_item(inventory, &line.ingredient.name)
            .is_some_and(|item| item.current_stock >= required);
        if !covered {
            let label = line.label();
            if !missing.contains(&label) {
                missing.push(label);
            }
        }
    }

    Ok(Feasibility {
        feasible: missing.is_empty(),
        missing,
    })
}

/// Result of committing a production run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUsage {
    pub updated_inventory: Vec<InventoryItem>,
    /// One outbound transaction per matched line, in processing order
    pub new_transactions: Vec<StockTransaction>,
}

/// Deduct the ingredients of a production run from stock
///
/// Deductions are applied cumulatively, so an item used by several lines
/// reflects every deduction. Stock is clamped at zero.
pub fn process_recipe_usage(
    recipe: &Recipe,
    target_quantity: Decimal,
    inventory: &[InventoryItem],
    now: DateTime<Utc>,
) -> Result<RecipeUsage, ScalingError> {
    let factor = scaling_factor(recipe, target_quantity)?;
    let mut updated_inventory = inventory.to_vec();
    let mut new_transactions = Vec::new();

    for line in recipe.ingredient_lines() {
        let Some(index) = find_inventory_index(&updated_inventory, &line.ingredient.name) else {
            continue;
        };
        let used = scaled(line.ingredient.amount, factor)?;
        let item = &mut updated_inventory[index];
        item.current_stock = item
            .current_stock
            .checked_sub(used)
            .ok_or(ScalingError::Overflow(used))?
            .max(Decimal::ZERO);

        new_transactions.push(usage_transaction(recipe, &line, &item.id, used, target_quantity, now));
    }

    Ok(RecipeUsage {
        updated_inventory,
        new_transactions,
    })
}

fn usage_transaction(
    recipe: &Recipe,
    line: &IngredientLine<'_>,
    inventory_item_id: &str,
    used: Decimal,
    target_quantity: Decimal,
    now: DateTime<Utc>,
) -> StockTransaction {
    let (id_prefix, reason) = match line.sub_recipe {
        Some(sub) => (
            "subrecipe",
            format!("Used in sub-recipe: {} ({})", sub.name, recipe.name),
        ),
        None => ("recipe", format!("Used in recipe: {}", recipe.name)),
    };

    StockTransaction {
        id: format!("{}-{}", id_prefix, Uuid::new_v4()),
        inventory_item_id: inventory_item_id.to_string(),
        transaction_type: TransactionType::Outbound,
        quantity: used,
        unit: line.ingredient.unit.clone(),
        reason,
        cost: None,
        supplier: None,
        batch_number: None,
        expiry_date: None,
        timestamp: now,
        user_id: None,
        recipe_id: Some(recipe.id.clone()),
        recipe_name: Some(recipe.name.clone()),
        target_quantity: Some(target_quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FinalBuild, Ingredient, InventoryCategory, RecipeYield, SubRecipe};

    fn item(id: &str, name: &str, stock: i64) -> InventoryItem {
        InventoryItem {
            id: id.into(),
            name: name.into(),
            current_stock: Decimal::from(stock),
            unit: "g".into(),
            minimum_stock: Decimal::ZERO,
            maximum_stock: Decimal::from(1000),
            cost_per_unit: Decimal::ZERO,
            supplier: None,
            last_restocked: Utc::now(),
            expiry_date: None,
            location: None,
            category: InventoryCategory::Other,
            is_active: true,
        }
    }

    fn sub(id: &str, name: &str, ingredients: Vec<Ingredient>) -> SubRecipe {
        SubRecipe {
            id: id.into(),
            name: name.into(),
            ingredients,
            instructions: None,
            yield_amount: RecipeYield {
                amount: Decimal::from(100),
                unit: "g".into(),
            },
        }
    }

    fn recipe() -> Recipe {
        Recipe {
            id: "cookie".into(),
            name: "Cookie".into(),
            photo: None,
            category_id: "cookies".into(),
            batch_size: Decimal::from(5),
            ingredients: vec![
                Ingredient::new("Butter", Decimal::from(125), "g"),
                Ingredient::new("Vanilla", Decimal::from(2), "g"),
            ],
            sub_recipes: vec![
                sub("caramel", "Caramel", vec![Ingredient::new("Sugar", Decimal::from(35), "g")]),
                sub("glaze", "Glaze", vec![Ingredient::new("sugar", Decimal::from(10), "g")]),
            ],
            final_build: FinalBuild::default(),
            instructions: vec![],
        }
    }

    #[test]
    fn test_find_inventory_item_ignores_case() {
        let inventory = vec![item("1", "Butter", 10)];
        assert!(find_inventory_item(&inventory, "BUTTER").is_some());
        assert!(find_inventory_item(&inventory, "butter ").is_none());
    }

    #[test]
    fn test_can_make_recipe_reports_short_and_untracked() {
        let inventory = vec![item("1", "butter", 100), item("2", "Sugar", 1000)];
        let result = can_make_recipe(&recipe(), Decimal::from(10), &inventory).unwrap();
        assert!(!result.feasible);
        assert_eq!(result.missing, vec!["Butter", "Vanilla"]);
    }

    #[test]
    fn test_can_make_recipe_qualifies_sub_recipe_labels() {
        let inventory = vec![item("1", "Butter", 1000), item("2", "Vanilla", 100)];
        let result = can_make_recipe(&recipe(), Decimal::from(10), &inventory).unwrap();
        assert_eq!(result.missing, vec!["Sugar (Caramel)", "sugar (Glaze)"]);
    }

    #[test]
    fn test_can_make_recipe_exact_stock_is_enough() {
        let inventory = vec![
            item("1", "Butter", 250),
            item("2", "Vanilla", 4),
            item("3", "Sugar", 90),
        ];
        let result = can_make_recipe(&recipe(), Decimal::from(10), &inventory).unwrap();
        assert!(result.feasible, "missing: {:?}", result.missing);
    }

    #[test]
    fn test_process_recipe_usage_clamps_and_orders() {
        let inventory = vec![item("b", "Butter", 100), item("s", "Sugar", 80)];
        let usage = process_recipe_usage(&recipe(), Decimal::from(10), &inventory, Utc::now()).unwrap();

        // Vanilla is untracked and skipped
        let reasons: Vec<&str> = usage.new_transactions.iter().map(|t| t.reason.as_str()).collect();
        assert_eq!(
            reasons,
            vec![
                "Used in recipe: Cookie",
                "Used in sub-recipe: Caramel (Cookie)",
                "Used in sub-recipe: Glaze (Cookie)",
            ]
        );
        assert_eq!(usage.new_transactions[0].quantity, Decimal::from(250));
        assert!(usage.new_transactions.iter().all(|t| t.transaction_type == TransactionType::Outbound));
        assert!(usage.new_transactions.iter().all(|t| t.recipe_id.as_deref() == Some("cookie")));

        assert_eq!(usage.updated_inventory[0].current_stock, Decimal::ZERO);
        // 80 - 70 - 20 clamps at zero, both sugar lines hit the same item
        assert_eq!(usage.updated_inventory[1].current_stock, Decimal::ZERO);
    }

    #[test]
    fn test_process_recipe_usage_cumulative_deduction() {
        let inventory = vec![item("s", "Sugar", 200)];
        let usage = process_recipe_usage(&recipe(), Decimal::from(10), &inventory, Utc::now()).unwrap();
        assert_eq!(usage.updated_inventory[0].current_stock, Decimal::from(110));
        assert_eq!(usage.new_transactions.len(), 2);
    }

    #[test]
    fn test_huge_run_is_rejected_before_touching_stock() {
        let inventory = vec![item("b", "Butter", 1000)];
        assert!(matches!(
            can_make_recipe(&recipe(), Decimal::MAX, &[]),
            Err(ScalingError::Overflow(_))
        ));
        assert!(matches!(
            process_recipe_usage(&recipe(), Decimal::MAX, &inventory, Utc::now()),
            Err(ScalingError::Overflow(_))
        ));

        let mut overdrawn = item("b", "Butter", 0);
        overdrawn.current_stock = Decimal::MIN;
        assert!(matches!(
            process_recipe_usage(&recipe(), Decimal::from(10), &[overdrawn], Utc::now()),
            Err(ScalingError::Overflow(_))
        ));
    }

    #[test]
    fn test_process_recipe_usage_keeps_full_precision() {
        let inventory = vec![item("b", "Butter", 1000)];
        let usage = process_recipe_usage(&recipe(), Decimal::ONE / Decimal::from(3), &inventory, Utc::now())
            .unwrap();
        let used = usage.new_transactions[0].quantity;
        assert!(used > Decimal::new(83, 1) && used < Decimal::new(84, 1));
        assert_ne!(used, used.round_dp(1));
    }
}
