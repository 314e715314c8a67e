//! Domain models for the Kitchen Recipe Calculator

mod brand;
mod inventory;
mod recipe;
mod user;

pub use brand::*;
pub use inventory::*;
pub use recipe::*;
pub use user::*;
