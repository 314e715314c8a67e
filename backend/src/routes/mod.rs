//! Route definitions for the recipe server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes - recipes and scaling
        .nest("/recipes", recipe_routes(state.clone()))
        // Protected routes - categories
        .nest("/categories", category_routes(state.clone()))
        // Protected routes - branding
        .nest("/brand", brand_routes(state.clone()))
        // Protected routes - inventory management
        .nest("/inventory", inventory_routes(state.clone()))
        // Protected routes - export and import
        .nest("/data", data_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/session", get(handlers::auth::session))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/login", post(handlers::auth::login))
        .merge(protected)
}

/// Recipe routes (protected)
fn recipe_routes(state: AppState) -> Router<AppState> {
    use handlers::recipe::*;

    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route(
            "/:recipe_id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .route("/:recipe_id/scale", get(scale_recipe))
        .route("/:recipe_id/feasibility", get(check_feasibility))
        .route("/:recipe_id/produce", post(produce_recipe))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Category routes (protected)
fn category_routes(state: AppState) -> Router<AppState> {
    use handlers::category::*;

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:category_id", axum::routing::put(update_category).delete(delete_category))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Branding routes (protected)
fn brand_routes(state: AppState) -> Router<AppState> {
    use handlers::brand::*;

    Router::new()
        .route("/", get(get_brand_settings).put(update_brand_settings))
        .route("/reset", post(reset_brand_settings))
        .route("/presets", get(list_presets))
        .route("/presets/:name/apply", post(apply_preset))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Inventory routes (protected)
fn inventory_routes(state: AppState) -> Router<AppState> {
    use handlers::inventory::*;

    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:item_id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/items/:item_id/movements", post(record_movement))
        .route("/transactions", get(list_transactions))
        .route("/alerts", get(list_alerts))
        .route("/alerts/:alert_id/acknowledge", post(acknowledge_alert))
        .route("/report", get(get_report))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Export and import routes (protected)
fn data_routes(state: AppState) -> Router<AppState> {
    use handlers::data::*;

    Router::new()
        .route("/export", get(export_data))
        .route("/import", post(import_data))
        .route("/summary", get(data_summary))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
