//! Recipe and category models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A recipe category (cookies, cheesecakes, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single ingredient line
///
/// The name doubles as the join key into the inventory ledger and is
/// matched case-insensitively. The unit is a free-text label that is
/// carried through scaling untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub amount: Decimal,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: Decimal, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }
}

/// Declared yield of a sub-recipe at the parent's base batch size
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeYield {
    pub amount: Decimal,
    pub unit: String,
}

/// A named ingredient set (caramel, sauce, ...) that feeds the final build
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubRecipe {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(rename = "yield")]
    pub yield_amount: RecipeYield,
}

/// One component assembled into a finished item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinalBuildElement {
    pub name: String,
    pub weight: Decimal,
    pub unit: String,
    /// Produced by a sub-recipe rather than measured directly
    #[serde(default)]
    pub is_sub_recipe: bool,
}

/// Final assembly of a recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinalBuild {
    pub elements: Vec<FinalBuildElement>,
}

/// A recipe defined at a fixed batch size
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Left empty on create to derive it from the name
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub category_id: String,
    /// Number of finished items the base recipe yields
    pub batch_size: Decimal,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub sub_recipes: Vec<SubRecipe>,
    #[serde(default)]
    pub final_build: FinalBuild,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Every ingredient line in processing order: top-level lines first,
    /// then each sub-recipe's lines in declaration order.
    pub fn ingredient_lines(&self) -> impl Iterator<Item = IngredientLine<'_>> {
        let top = self
            .ingredients
            .iter()
            .map(|ingredient| IngredientLine {
                ingredient,
                sub_recipe: None,
            });
        let nested = self.sub_recipes.iter().flat_map(|sub| {
            sub.ingredients.iter().map(move |ingredient| IngredientLine {
                ingredient,
                sub_recipe: Some(sub),
            })
        });
        top.chain(nested)
    }
}

/// An ingredient together with the sub-recipe it belongs to, if any
#[derive(Debug, Clone, Copy)]
pub struct IngredientLine<'a> {
    pub ingredient: &'a Ingredient,
    pub sub_recipe: Option<&'a SubRecipe>,
}

impl IngredientLine<'_> {
    /// Label used when reporting the line: sub-recipe lines are qualified
    /// with the sub-recipe name, e.g. `"Caster sugar (Raspberry Caramel)"`.
    pub fn label(&self) -> String {
        match self.sub_recipe {
            Some(sub) => format!("{} ({})", self.ingredient.name, sub.name),
            None => self.ingredient.name.clone(),
        }
    }
}

/// Derive an identifier from a display name.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-` and trims leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}
