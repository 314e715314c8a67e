//! Export and import tests
//!
//! Tests for moving data between installations including:
//! - Exporting each document type and importing it into an empty data set
//! - Merge-by-id statistics
//! - Rejection of bad documents before anything is merged

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::ledger::NewInventoryItem;
use shared::transfer::{apply_import, export_file_name, parse_import, ExportFile, ExportKind, APP_NAME};
use shared::{ImportError, InventoryCategory, InventoryItem, KitchenData};
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

fn healthy_item(name: &str) -> InventoryItem {
    NewInventoryItem {
        name: name.to_string(),
        current_stock: dec("800"),
        unit: "g".to_string(),
        minimum_stock: dec("100"),
        maximum_stock: dec("1000"),
        cost_per_unit: dec("2"),
        supplier: Some("Wholesale Foods".to_string()),
        expiry_date: None,
        location: Some("Dry store".to_string()),
        category: InventoryCategory::Flour,
    }
    .into_item(now())
}

fn stocked_kitchen() -> KitchenData {
    let mut data = KitchenData::with_defaults();
    data.inventory = vec![healthy_item("Plain flour"), healthy_item("Caster sugar")];
    data.brand_settings.company_name = "Corner Bakery".to_string();
    data
}

fn export_json(kind: ExportKind, data: &KitchenData) -> String {
    ExportFile::build(kind, data, now()).to_json_pretty().unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A complete export imported into an empty data set reproduces the counts
    #[test]
    fn test_complete_export_into_empty_data() {
        let source = stocked_kitchen();
        let json = export_json(ExportKind::Complete, &source);

        let mut target = KitchenData::default();
        let file = parse_import(&json).unwrap();
        let summary = apply_import(&mut target, file, now());

        assert_eq!(target.summary(), source.summary());
        assert_eq!(summary.recipes.added, 3);
        assert_eq!(summary.categories.added, 4);
        assert_eq!(summary.inventory.added, 2);
        assert!(summary.brand_settings_replaced);
        assert_eq!(target.brand_settings.company_name, "Corner Bakery");

        let ids: Vec<&str> = target.recipes.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = source.recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, expected);
        assert_eq!(target.inventory[0].current_stock, dec("800"));
    }

    /// Importing the same export twice replaces instead of duplicating
    #[test]
    fn test_reimport_replaces_by_id() {
        let source = stocked_kitchen();
        let json = export_json(ExportKind::RecipesOnly, &source);
        let mut target = KitchenData::with_defaults();

        let summary = apply_import(&mut target, parse_import(&json).unwrap(), now());
        assert_eq!(summary.recipes.added, 0);
        assert_eq!(summary.recipes.replaced, 3);
        assert_eq!(target.recipes.len(), 3);
        assert!(summary.touches_recipes());
        assert!(!summary.touches_inventory());
    }

    /// A recipes-only document leaves stock and branding alone
    #[test]
    fn test_recipes_only_import_scope() {
        let source = stocked_kitchen();
        let json = export_json(ExportKind::RecipesOnly, &source);

        let mut target = KitchenData::default();
        apply_import(&mut target, parse_import(&json).unwrap(), now());

        assert_eq!(target.recipes.len(), 3);
        assert!(target.inventory.is_empty());
        assert_ne!(target.brand_settings.company_name, "Corner Bakery");
    }

    /// Imported low stock raises alerts in the target
    #[test]
    fn test_inventory_import_refreshes_alerts() {
        let mut source = KitchenData::default();
        let mut low = healthy_item("Butter");
        low.current_stock = dec("10");
        source.inventory.push(low);
        let json = export_json(ExportKind::InventoryOnly, &source);

        let mut target = KitchenData::default();
        apply_import(&mut target, parse_import(&json).unwrap(), now());

        assert_eq!(target.alerts.len(), 1);
        assert_eq!(target.summary().active_alerts, 1);
    }

    #[test]
    fn test_rejected_documents() {
        let wrong_type = format!(
            r#"{{"version": "1.0", "appName": "{}", "type": "everything", "recipes": []}}"#,
            APP_NAME
        );
        assert!(matches!(parse_import(&wrong_type), Err(ImportError::UnsupportedType(t)) if t == "everything"));

        let no_type = r#"{"version": "1.0", "appName": "Kitchen Recipe Calculator"}"#;
        assert!(matches!(parse_import(no_type), Err(ImportError::MissingField("type"))));

        let empty_version = r#"{"version": "", "appName": "Kitchen Recipe Calculator", "type": "complete"}"#;
        assert!(matches!(parse_import(empty_version), Err(ImportError::MissingField("version"))));

        assert!(matches!(parse_import("{ not json"), Err(ImportError::Malformed(_))));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(ExportKind::InventoryOnly, now()),
            "recipe-calculator-inventory-only-2024-03-01.json"
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Merging a document adds new ids and replaces known ones
        #[test]
        fn prop_merge_counts(existing in 0usize..6, incoming_new in 0usize..6) {
            let mut target = KitchenData::default();
            let mut source = KitchenData::default();
            for i in 0..existing {
                let item = healthy_item(&format!("Known {}", i));
                target.inventory.push(item.clone());
                source.inventory.push(item);
            }
            for i in 0..incoming_new {
                source.inventory.push(healthy_item(&format!("New {}", i)));
            }

            let json = export_json(ExportKind::InventoryOnly, &source);
            let summary = apply_import(&mut target, parse_import(&json).unwrap(), now());

            prop_assert_eq!(summary.inventory.replaced, existing);
            prop_assert_eq!(summary.inventory.added, incoming_new);
            prop_assert_eq!(target.inventory.len(), existing + incoming_new);
        }
    }
}
