//! Shared types and core logic for the Kitchen Recipe Calculator
//!
//! This crate holds the recipe scaling engine, inventory reconciliation and
//! the data models shared between the backend and the browser build (via WASM).

pub mod alerts;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod kitchen;
pub mod ledger;
pub mod models;
pub mod reconciliation;
pub mod scaling;
pub mod seed;
pub mod storage;
pub mod transfer;
pub mod validation;

pub use error::*;
pub use kitchen::{DataSummary, KitchenData, ProductionRun};
pub use models::*;
pub use reconciliation::{can_make_recipe, process_recipe_usage, Feasibility, RecipeUsage};
pub use scaling::{scale_recipe, scaling_factor, ScaledAmount, ScaledRecipe};
