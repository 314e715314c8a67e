//! Validation utilities for recipes, inventory and branding

use rust_decimal::Decimal;
use validator::Validate;

use crate::error::CatalogError;
use crate::models::{BrandSettings, Category, Ingredient, InventoryItem, Recipe};

// ============================================================================
// Field Validations
// ============================================================================

/// Validate a `#rrggbb` colour
pub fn validate_hex_color(color: &str) -> Result<(), &'static str> {
    let Some(hex) = color.strip_prefix('#') else {
        return Err("Colour must start with #");
    };
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Colour must be six hexadecimal digits");
    }
    Ok(())
}

/// Validate that an amount is not negative
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Validate a batch size (must be positive)
pub fn validate_batch_size(batch_size: Decimal) -> Result<(), &'static str> {
    if batch_size <= Decimal::ZERO {
        return Err("Batch size must be positive");
    }
    Ok(())
}

fn validate_ingredient(ingredient: &Ingredient, field: &str) -> Result<(), CatalogError> {
    if ingredient.name.trim().is_empty() {
        return Err(CatalogError::validation(field, "Ingredient name is required"));
    }
    if ingredient.unit.trim().is_empty() {
        return Err(CatalogError::validation(field, "Ingredient unit is required"));
    }
    validate_amount(ingredient.amount).map_err(|msg| CatalogError::validation(field, msg))
}

// ============================================================================
// Entity Validations
// ============================================================================

pub fn validate_recipe(recipe: &Recipe) -> Result<(), CatalogError> {
    if recipe.id.trim().is_empty() {
        return Err(CatalogError::validation("id", "Recipe id is required"));
    }
    if recipe.name.trim().is_empty() {
        return Err(CatalogError::validation("name", "Recipe name is required"));
    }
    validate_batch_size(recipe.batch_size).map_err(|msg| CatalogError::validation("batchSize", msg))?;

    for (index, ingredient) in recipe.ingredients.iter().enumerate() {
        validate_ingredient(ingredient, &format!("ingredients[{}]", index))?;
    }
    for (sub_index, sub) in recipe.sub_recipes.iter().enumerate() {
        if sub.name.trim().is_empty() {
            return Err(CatalogError::validation(
                format!("subRecipes[{}]", sub_index),
                "Sub-recipe name is required",
            ));
        }
        for (index, ingredient) in sub.ingredients.iter().enumerate() {
            validate_ingredient(
                ingredient,
                &format!("subRecipes[{}].ingredients[{}]", sub_index, index),
            )?;
        }
    }
    for (index, element) in recipe.final_build.elements.iter().enumerate() {
        validate_amount(element.weight).map_err(|msg| {
            CatalogError::validation(format!("finalBuild.elements[{}]", index), msg)
        })?;
    }
    Ok(())
}

pub fn validate_category(category: &Category) -> Result<(), CatalogError> {
    if category.id.trim().is_empty() {
        return Err(CatalogError::validation("id", "Category id is required"));
    }
    category
        .validate()
        .map_err(|errors| CatalogError::validation("name", errors.to_string()))
}

pub fn validate_inventory_item(item: &InventoryItem) -> Result<(), CatalogError> {
    if item.name.trim().is_empty() {
        return Err(CatalogError::validation("name", "Item name is required"));
    }
    validate_amount(item.minimum_stock).map_err(|msg| CatalogError::validation("minimumStock", msg))?;
    validate_amount(item.cost_per_unit).map_err(|msg| CatalogError::validation("costPerUnit", msg))?;
    if item.maximum_stock < item.minimum_stock {
        return Err(CatalogError::validation(
            "maximumStock",
            "Maximum stock cannot be below minimum stock",
        ));
    }
    Ok(())
}

pub fn validate_brand_settings(settings: &BrandSettings) -> Result<(), CatalogError> {
    if settings.company_name.trim().is_empty() {
        return Err(CatalogError::validation("companyName", "Company name is required"));
    }
    for (field, color) in settings.colors() {
        validate_hex_color(color).map_err(|msg| CatalogError::validation(field, msg))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#2563eb").is_ok());
        assert!(validate_hex_color("#FFFFFF").is_ok());
        assert!(validate_hex_color("2563eb").is_err());
        assert!(validate_hex_color("#fff").is_err());
        assert!(validate_hex_color("#zzzzzz").is_err());
    }

    #[test]
    fn test_seed_recipes_are_valid() {
        for recipe in seed::default_recipes() {
            assert!(validate_recipe(&recipe).is_ok(), "{} failed", recipe.id);
        }
    }

    #[test]
    fn test_validate_recipe_negative_amount() {
        let mut recipe = seed::default_recipes().remove(0);
        recipe.sub_recipes[0].ingredients[0].amount = Decimal::from(-1);
        let err = validate_recipe(&recipe).unwrap_err();
        assert_eq!(
            err,
            CatalogError::Validation {
                field: "subRecipes[0].ingredients[0]".into(),
                message: "Amount cannot be negative".into(),
            }
        );
    }

    #[test]
    fn test_validate_category_name_required() {
        let category = Category {
            id: "x".into(),
            name: String::new(),
            description: None,
        };
        assert!(validate_category(&category).is_err());
    }

    #[test]
    fn test_default_brand_settings_are_valid() {
        assert!(validate_brand_settings(&BrandSettings::default()).is_ok());

        let mut settings = BrandSettings::default();
        settings.accent_color = "green".into();
        assert!(validate_brand_settings(&settings).is_err());
    }
}
