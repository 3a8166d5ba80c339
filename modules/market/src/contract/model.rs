//! Pure market models for in-process communication (no serde, no storage types).
//!
//! Entities are always handed out fully resolved: an `Inventory` carries its `Product`,
//! which carries its `Category`, and so on. Identity fields are assigned by the store.
//!
//! Change-sets (`*Patch`) are sparse: `None` means "leave the current value unchanged".
//! `Some(String::new())` is a legitimate update and is applied as-is.

use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub active: bool,
}

/// Data for registering a new category; the stored record starts active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

/// Partial update data for a category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Category {
    /// Merge the change-set field by field. The active flag is not part of the
    /// change-set and is never touched here.
    pub fn apply_patch(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RolePatch {
    pub name: Option<String>,
}

impl Role {
    pub fn apply_patch(&mut self, patch: RolePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentMethod {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentMethodPatch {
    pub name: Option<String>,
}

impl PaymentMethod {
    pub fn apply_patch(&mut self, patch: PaymentMethodPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dni: String,
    pub phone: String,
    pub image: String,
    pub role: Role,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dni: String,
    pub phone: String,
    pub image: String,
    pub role_id: i64,
}

/// Partial update data for a user profile. Role changes go through a dedicated operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub dni: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
}

impl User {
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(dni) = patch.dni {
            self.dni = dni;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub image: String,
    pub category_id: i64,
}

/// Partial update data for a product; `category` is already resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<Category>,
}

impl Product {
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }
}

/// Stock record for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub id: i64,
    pub product: Product,
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInventory {
    pub product_id: i64,
    pub stock: i32,
}

/// An order placed by a user. The store keys orders with a 32-bit id.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub user: User,
    pub placed_at: NaiveDateTime,
    pub total: f64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i64,
    pub placed_at: NaiveDateTime,
    pub total: f64,
}

/// Sales receipt; it may have been issued without an order.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesReceipt {
    pub id: i64,
    pub order: Option<Order>,
    pub issued_at: NaiveDateTime,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSalesReceipt {
    pub order_id: Option<i32>,
    pub issued_at: NaiveDateTime,
    pub total: f64,
}
