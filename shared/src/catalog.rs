//! Id-keyed collection operations for recipes, categories and inventory
//!
//! Every collection is a plain ordered `Vec`; entities reference each other
//! by id only.

use serde::Serialize;

use crate::error::CatalogError;
use crate::models::{slugify, Category, InventoryItem, Recipe, StockAlert, StockTransaction};
use crate::validation::{validate_category, validate_recipe};

/// An entity with a stable string id
pub trait Identified {
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

macro_rules! identified {
    ($ty:ty, $entity:literal) => {
        impl Identified for $ty {
            const ENTITY: &'static str = $entity;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

identified!(Recipe, "Recipe");
identified!(Category, "Category");
identified!(InventoryItem, "Inventory item");
identified!(StockTransaction, "Transaction");
identified!(StockAlert, "Alert");

pub fn find_by_id<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

pub fn get_by_id<'a, T: Identified>(items: &'a [T], id: &str) -> Result<&'a T, CatalogError> {
    find_by_id(items, id).ok_or_else(|| not_found::<T>(id))
}

/// Append a new entity, rejecting a duplicate id
pub fn insert<T: Identified>(items: &mut Vec<T>, item: T) -> Result<(), CatalogError> {
    if find_by_id(items, item.id()).is_some() {
        return Err(CatalogError::Duplicate {
            entity: T::ENTITY,
            id: item.id().to_string(),
        });
    }
    items.push(item);
    Ok(())
}

/// Replace the entity with the same id in place
pub fn replace<T: Identified>(items: &mut [T], item: T) -> Result<(), CatalogError> {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(slot) => {
            *slot = item;
            Ok(())
        }
        None => Err(not_found::<T>(item.id())),
    }
}

pub fn remove<T: Identified>(items: &mut Vec<T>, id: &str) -> Result<T, CatalogError> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| not_found::<T>(id))?;
    Ok(items.remove(index))
}

/// What a merge did to one collection
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergeStats {
    pub added: usize,
    pub replaced: usize,
}

/// Merge incoming entities: matching ids are replaced in place, the rest
/// are appended in their incoming order.
pub fn merge_by_id<T: Identified>(items: &mut Vec<T>, incoming: Vec<T>) -> MergeStats {
    let mut stats = MergeStats::default();
    for item in incoming {
        match items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                stats.replaced += 1;
            }
            None => {
                items.push(item);
                stats.added += 1;
            }
        }
    }
    stats
}

fn not_found<T: Identified>(id: &str) -> CatalogError {
    CatalogError::NotFound {
        entity: T::ENTITY,
        id: id.to_string(),
    }
}

fn slug_id_if_missing(id: &mut String, name: &str) {
    if id.trim().is_empty() {
        *id = slugify(name);
    }
}

/// Add a recipe, deriving its id from the name when none was given.
/// Returns the id used.
pub fn add_recipe(recipes: &mut Vec<Recipe>, mut recipe: Recipe) -> Result<String, CatalogError> {
    slug_id_if_missing(&mut recipe.id, &recipe.name);
    validate_recipe(&recipe)?;
    let id = recipe.id.clone();
    insert(recipes, recipe)?;
    Ok(id)
}

pub fn update_recipe(recipes: &mut [Recipe], recipe: Recipe) -> Result<(), CatalogError> {
    validate_recipe(&recipe)?;
    replace(recipes, recipe)
}

pub fn add_category(categories: &mut Vec<Category>, mut category: Category) -> Result<String, CatalogError> {
    slug_id_if_missing(&mut category.id, &category.name);
    validate_category(&category)?;
    let id = category.id.clone();
    insert(categories, category)?;
    Ok(id)
}

pub fn update_category(categories: &mut [Category], category: Category) -> Result<(), CatalogError> {
    validate_category(&category)?;
    replace(categories, category)
}

pub fn recipes_in_category<'a>(recipes: &'a [Recipe], category_id: &'a str) -> impl Iterator<Item = &'a Recipe> {
    recipes.iter().filter(move |recipe| recipe.category_id == category_id)
}

/// Delete a category that no recipe references
pub fn delete_category(
    categories: &mut Vec<Category>,
    recipes: &[Recipe],
    category_id: &str,
) -> Result<Category, CatalogError> {
    let count = recipes_in_category(recipes, category_id).count();
    if count > 0 {
        return Err(CatalogError::CategoryInUse { count });
    }
    remove(categories, category_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut categories = vec![category("cookies", "Cookies")];
        let err = insert(&mut categories, category("cookies", "Other")).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { .. }));
        assert_eq!(categories.len(), 1);
    }

    #[test]
    fn test_replace_and_remove() {
        let mut categories = vec![category("a", "A"), category("b", "B")];
        replace(&mut categories, category("b", "Bee")).unwrap();
        assert_eq!(categories[1].name, "Bee");
        assert!(replace(&mut categories, category("c", "C")).is_err());

        let removed = remove(&mut categories, "a").unwrap();
        assert_eq!(removed.name, "A");
        assert!(matches!(remove(&mut categories, "a"), Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn test_merge_by_id_replaces_then_appends() {
        let mut categories = vec![category("a", "A"), category("b", "B")];
        let stats = merge_by_id(
            &mut categories,
            vec![category("c", "C"), category("a", "A2")],
        );
        assert_eq!(stats, MergeStats { added: 1, replaced: 1 });
        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(categories[0].name, "A2");
    }

    #[test]
    fn test_delete_category_in_use() {
        let recipes = seed::default_recipes();
        let mut categories = seed::default_categories();
        let err = delete_category(&mut categories, &recipes, "cookies").unwrap_err();
        assert!(matches!(err, CatalogError::CategoryInUse { count } if count > 0));

        assert!(delete_category(&mut categories, &recipes, "caramels").is_ok());
    }

    #[test]
    fn test_add_recipe_validates() {
        let mut recipes = Vec::new();
        let mut recipe = seed::default_recipes().remove(0);
        recipe.batch_size = rust_decimal::Decimal::ZERO;
        assert!(add_recipe(&mut recipes, recipe).is_err());
        assert!(recipes.is_empty());
    }

    #[test]
    fn test_add_derives_slug_id() {
        let mut categories = Vec::new();
        let id = add_category(&mut categories, category("", "Mini Cheesecakes!")).unwrap();
        assert_eq!(id, "mini-cheesecakes");
        assert!(add_category(&mut categories, category("", "mini cheesecakes")).is_err());

        let mut recipes = Vec::new();
        let mut recipe = seed::default_recipes().remove(1);
        recipe.id = String::new();
        assert_eq!(add_recipe(&mut recipes, recipe).unwrap(), "sticky-toffee-pudding");
    }
}
