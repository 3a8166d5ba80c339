//! SeaORM table mappings. Column names follow the existing schema; Rust field names
//! follow the contract models.

pub mod category;
pub mod inventory;
pub mod order;
pub mod payment_method;
pub mod product;
pub mod role;
pub mod sales_receipt;
pub mod user;
