//! Recipe scaling
//!
//! A recipe is defined at a base batch size. Scaling to a target quantity
//! multiplies every amount (top-level ingredients, sub-recipe ingredients,
//! sub-recipe yields and final build weights) by one factor,
//! `target / batch_size`, and rounds the result to one decimal place for
//! display. Units are carried through unchanged.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::ScalingError;
use crate::models::{Ingredient, Recipe};

/// Unit label for countable items
pub const PIECE_UNIT: &str = "piece";

/// Compute the scaling factor for a target quantity
///
/// A zero target yields a zero factor. A non-positive batch size is a
/// defect in the recipe itself and is rejected.
pub fn scaling_factor(recipe: &Recipe, target_quantity: Decimal) -> Result<Decimal, ScalingError> {
    if recipe.batch_size <= Decimal::ZERO {
        return Err(ScalingError::InvalidRecipe {
            recipe_id: recipe.id.clone(),
            batch_size: recipe.batch_size,
        });
    }
    if target_quantity < Decimal::ZERO {
        return Err(ScalingError::NegativeTarget(target_quantity));
    }
    if target_quantity.is_zero() {
        return Ok(Decimal::ZERO);
    }
    target_quantity
        .checked_div(recipe.batch_size)
        .ok_or(ScalingError::Overflow(target_quantity))
}

/// Multiply an amount by a factor without rounding
pub fn scaled(amount: Decimal, factor: Decimal) -> Result<Decimal, ScalingError> {
    amount.checked_mul(factor).ok_or(ScalingError::Overflow(factor))
}

/// Round a value to one decimal place, halves away from zero
pub fn round_for_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Scale a single amount with display rounding
pub fn scale_amount(amount: Decimal, factor: Decimal) -> Result<Decimal, ScalingError> {
    scaled(amount, factor).map(round_for_display)
}

/// Format a scaling factor as shown next to a recipe, e.g. `2.00x`
pub fn format_factor(factor: Decimal) -> String {
    let rounded = factor.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}x", rounded)
}

/// A scaled, display-rounded quantity
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScaledAmount {
    pub amount: Decimal,
    pub unit: String,
    /// Human-readable rendering, see [`ScaledAmount`]'s `Display`
    pub display: String,
}

impl ScaledAmount {
    pub fn new(amount: Decimal, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        let display = render_amount(amount, &unit);
        Self {
            amount,
            unit,
            display,
        }
    }

    pub fn is_piece(&self) -> bool {
        self.unit == PIECE_UNIT
    }
}

impl std::fmt::Display for ScaledAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}

/// Fractions of a piece read better as a percentage of one piece
fn render_amount(amount: Decimal, unit: &str) -> String {
    if unit == PIECE_UNIT && amount < Decimal::ONE {
        let percent = (amount * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        return format!("{}% of 1 {}", percent.normalize(), unit);
    }
    let plural = if unit == PIECE_UNIT && amount != Decimal::ONE {
        "s"
    } else {
        ""
    };
    format!("{} {}{}", amount.normalize(), unit, plural)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScaledIngredient {
    pub name: String,
    pub quantity: ScaledAmount,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScaledSubRecipe {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<ScaledIngredient>,
    #[serde(rename = "yield")]
    pub yield_amount: ScaledAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScaledBuildElement {
    pub name: String,
    pub weight: ScaledAmount,
    pub is_sub_recipe: bool,
}

/// A recipe scaled to a target quantity
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScaledRecipe {
    pub recipe_id: String,
    pub recipe_name: String,
    pub batch_size: Decimal,
    pub target_quantity: Decimal,
    pub scaling_factor: Decimal,
    pub ingredients: Vec<ScaledIngredient>,
    pub sub_recipes: Vec<ScaledSubRecipe>,
    pub final_build: Vec<ScaledBuildElement>,
    pub instructions: Vec<String>,
}

impl ScaledRecipe {
    /// True when nothing is being made; callers should not present the
    /// all-zero quantities as a result.
    pub fn is_empty(&self) -> bool {
        self.scaling_factor.is_zero()
    }

    pub fn factor_label(&self) -> String {
        format_factor(self.scaling_factor)
    }
}

fn scale_ingredients(ingredients: &[Ingredient], factor: Decimal) -> Result<Vec<ScaledIngredient>, ScalingError> {
    ingredients
        .iter()
        .map(|ingredient| {
            Ok(ScaledIngredient {
                name: ingredient.name.clone(),
                quantity: ScaledAmount::new(scale_amount(ingredient.amount, factor)?, &ingredient.unit),
            })
        })
        .collect()
}

/// Scale a recipe to `target_quantity` finished items
pub fn scale_recipe(recipe: &Recipe, target_quantity: Decimal) -> Result<ScaledRecipe, ScalingError> {
    let factor = scaling_factor(recipe, target_quantity)?;

    let sub_recipes = recipe
        .sub_recipes
        .iter()
        .map(|sub| {
            Ok(ScaledSubRecipe {
                id: sub.id.clone(),
                name: sub.name.clone(),
                ingredients: scale_ingredients(&sub.ingredients, factor)?,
                yield_amount: ScaledAmount::new(
                    scale_amount(sub.yield_amount.amount, factor)?,
                    &sub.yield_amount.unit,
                ),
                instructions: sub.instructions.clone(),
            })
        })
        .collect::<Result<Vec<_>, ScalingError>>()?;

    let final_build = recipe
        .final_build
        .elements
        .iter()
        .map(|element| {
            Ok(ScaledBuildElement {
                name: element.name.clone(),
                weight: ScaledAmount::new(scale_amount(element.weight, factor)?, &element.unit),
                is_sub_recipe: element.is_sub_recipe,
            })
        })
        .collect::<Result<Vec<_>, ScalingError>>()?;

    Ok(ScaledRecipe {
        recipe_id: recipe.id.clone(),
        recipe_name: recipe.name.clone(),
        batch_size: recipe.batch_size,
        target_quantity,
        scaling_factor: factor,
        ingredients: scale_ingredients(&recipe.ingredients, factor)?,
        sub_recipes,
        final_build,
        instructions: recipe.instructions.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FinalBuild, FinalBuildElement, RecipeYield, SubRecipe};

    fn dec(n: i64, scale: u32) -> Decimal {
        Decimal::new(n, scale)
    }

    fn cookie_recipe() -> Recipe {
        Recipe {
            id: "cookie".into(),
            name: "Cookie".into(),
            photo: None,
            category_id: "cookies".into(),
            batch_size: Decimal::from(5),
            ingredients: vec![
                Ingredient::new("Butter", Decimal::from(125), "g"),
                Ingredient::new("Egg", Decimal::from(1), "piece"),
            ],
            sub_recipes: vec![SubRecipe {
                id: "caramel".into(),
                name: "Caramel".into(),
                ingredients: vec![Ingredient::new("Caster sugar", Decimal::from(35), "g")],
                instructions: Some("Heat until golden".into()),
                yield_amount: RecipeYield {
                    amount: Decimal::from(110),
                    unit: "g".into(),
                },
            }],
            final_build: FinalBuild {
                elements: vec![
                    FinalBuildElement {
                        name: "Caramel".into(),
                        weight: Decimal::from(120),
                        unit: "g".into(),
                        is_sub_recipe: true,
                    },
                    FinalBuildElement {
                        name: "Freeze dried raspberry".into(),
                        weight: dec(25, 2),
                        unit: "g".into(),
                        is_sub_recipe: false,
                    },
                ],
            },
            instructions: vec!["Bake".into()],
        }
    }

    #[test]
    fn test_scaling_factor_doubles() {
        let factor = scaling_factor(&cookie_recipe(), Decimal::from(10)).unwrap();
        assert_eq!(factor, Decimal::from(2));
    }

    #[test]
    fn test_scaling_factor_zero_target() {
        let factor = scaling_factor(&cookie_recipe(), Decimal::ZERO).unwrap();
        assert!(factor.is_zero());
    }

    #[test]
    fn test_scaling_factor_rejects_bad_batch_size() {
        let mut recipe = cookie_recipe();
        recipe.batch_size = Decimal::ZERO;
        assert!(matches!(
            scaling_factor(&recipe, Decimal::from(10)),
            Err(ScalingError::InvalidRecipe { .. })
        ));

        recipe.batch_size = Decimal::from(-2);
        assert!(scale_recipe(&recipe, Decimal::from(10)).is_err());
    }

    #[test]
    fn test_scaling_factor_rejects_negative_target() {
        assert_eq!(
            scaling_factor(&cookie_recipe(), Decimal::from(-1)),
            Err(ScalingError::NegativeTarget(Decimal::from(-1)))
        );
    }

    #[test]
    fn test_huge_target_is_an_error() {
        assert_eq!(
            scale_recipe(&cookie_recipe(), Decimal::MAX).unwrap_err(),
            ScalingError::Overflow(Decimal::MAX / Decimal::from(5))
        );
        assert!(scaling_factor(&cookie_recipe(), Decimal::MAX).is_ok());

        let mut tiny_batch = cookie_recipe();
        tiny_batch.batch_size = Decimal::new(1, 10);
        assert!(matches!(
            scaling_factor(&tiny_batch, Decimal::MAX),
            Err(ScalingError::Overflow(_))
        ));
    }

    #[test]
    fn test_round_for_display_half_away_from_zero() {
        assert_eq!(round_for_display(dec(25, 2)), dec(3, 1));
        assert_eq!(round_for_display(dec(24, 2)), dec(2, 1));
        assert_eq!(round_for_display(dec(3333, 3)), dec(33, 1));
    }

    #[test]
    fn test_scale_recipe_one_item() {
        let scaled = scale_recipe(&cookie_recipe(), Decimal::ONE).unwrap();
        assert_eq!(scaled.scaling_factor, dec(2, 1));
        assert_eq!(scaled.ingredients[0].quantity.amount, Decimal::from(25));
        assert_eq!(scaled.ingredients[0].quantity.to_string(), "25 g");
        assert_eq!(scaled.ingredients[1].quantity.to_string(), "20% of 1 piece");
        assert_eq!(scaled.sub_recipes[0].ingredients[0].quantity.amount, Decimal::from(7));
        assert_eq!(scaled.sub_recipes[0].yield_amount.amount, Decimal::from(22));
        // 0.25 * 0.2 = 0.05 rounds up to 0.1
        assert_eq!(scaled.final_build[1].weight.amount, dec(1, 1));
        assert!(scaled.final_build[0].is_sub_recipe);
        assert_eq!(scaled.factor_label(), "0.20x");
    }

    #[test]
    fn test_scale_recipe_zero_target_is_empty() {
        let scaled = scale_recipe(&cookie_recipe(), Decimal::ZERO).unwrap();
        assert!(scaled.is_empty());
        assert!(scaled.ingredients.iter().all(|i| i.quantity.amount.is_zero()));
        assert!(scaled.final_build.iter().all(|e| e.weight.amount.is_zero()));
    }

    #[test]
    fn test_piece_rendering() {
        assert_eq!(ScaledAmount::new(Decimal::ONE, "piece").to_string(), "1 piece");
        assert_eq!(ScaledAmount::new(Decimal::from(3), "piece").to_string(), "3 pieces");
        assert_eq!(ScaledAmount::new(dec(15, 1), "piece").to_string(), "1.5 pieces");
        assert_eq!(ScaledAmount::new(dec(5, 1), "piece").to_string(), "50% of 1 piece");
        assert_eq!(ScaledAmount::new(dec(5, 1), "g").to_string(), "0.5 g");
    }

    #[test]
    fn test_format_factor() {
        assert_eq!(format_factor(Decimal::from(2)), "2.00x");
        assert_eq!(format_factor(Decimal::ONE / Decimal::from(3)), "0.33x");
    }
}
