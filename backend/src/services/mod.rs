//! Business logic services for the recipe server

pub mod auth;
pub mod brand;
pub mod category;
pub mod data;
pub mod inventory;
pub mod recipe;

pub use auth::AuthService;
pub use brand::BrandService;
pub use category::CategoryService;
pub use data::DataService;
pub use inventory::InventoryService;
pub use recipe::RecipeService;
