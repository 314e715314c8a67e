//! HTTP handlers for the recipe server

pub mod auth;
pub mod brand;
pub mod category;
pub mod data;
pub mod health;
pub mod inventory;
pub mod recipe;

pub use health::health_check;
