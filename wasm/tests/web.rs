//! Browser tests, run with `wasm-pack test --headless --firefox wasm`

#![cfg(target_arch = "wasm32")]

use chrono::Utc;
use recipe_scaler_wasm::{format_amount, format_scaling_factor, KitchenClient, LocalStorageStore};
use rust_decimal::Decimal;
use shared::storage::{keys, KeyValueStore};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let mut store = LocalStorageStore::from_window().unwrap();
    store.set("krc-test-key", "[1,2,3]").unwrap();
    assert_eq!(store.get("krc-test-key").unwrap().as_deref(), Some("[1,2,3]"));

    store.remove("krc-test-key").unwrap();
    assert_eq!(store.get("krc-test-key").unwrap(), None);
}

#[wasm_bindgen_test]
fn formatting_rejects_non_finite_numbers() {
    assert_eq!(format_amount(125.0, "g").unwrap(), "125 g");
    assert!(format_amount(f64::NAN, "g").is_err());
    assert!(format_scaling_factor(f64::INFINITY).is_err());
}

#[wasm_bindgen_test]
fn kitchen_persists_to_local_storage() {
    let mut store = LocalStorageStore::from_window().unwrap();
    store.remove(keys::INVENTORY).unwrap();
    store.remove(keys::AUTH_USER).unwrap();

    let mut client = KitchenClient::open(store, Utc::now()).unwrap();
    client.login("staff", "staff123", Utc::now()).unwrap();
    assert!(client.scale("lemon-meringue", Decimal::MAX, Utc::now()).is_err());
    client.produce("lemon-meringue", Decimal::ONE, Utc::now()).unwrap();

    let reopened = KitchenClient::open(LocalStorageStore::from_window().unwrap(), Utc::now()).unwrap();
    assert_eq!(
        reopened.session().map(|session| session.user.username.as_str()),
        Some("staff")
    );
    client.logout().unwrap();
}
