//! Ports for the domain layer: persistence operations the service needs.
//! Object-safe and async-friendly via `async_trait`.
//!
//! Every entity handed back is fully resolved (related records loaded eagerly), so the
//! projection builders never need a store round-trip.

use async_trait::async_trait;

use crate::contract::model::{
    Category, Inventory, NewCategory, NewInventory, NewOrder, NewPaymentMethod, NewProduct,
    NewRole, NewSalesReceipt, NewUser, Order, PaymentMethod, Product, Role, SalesReceipt, User,
};
use crate::domain::lookup::InventoryLookup;

#[async_trait]
pub trait CategoriesRepository: Send + Sync {
    async fn find_category(&self, id: i64) -> anyhow::Result<Option<Category>>;
    async fn list_categories(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Category>>;
    /// Persist a new category; the store assigns the id and the record starts active.
    async fn insert_category(&self, new: NewCategory) -> anyhow::Result<Category>;
    /// Write back every mutable column of `c` (by primary key).
    async fn update_category(&self, c: &Category) -> anyhow::Result<()>;
}

#[async_trait]
pub trait RolesRepository: Send + Sync {
    async fn find_role(&self, id: i64) -> anyhow::Result<Option<Role>>;
    async fn list_roles(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Role>>;
    async fn insert_role(&self, new: NewRole) -> anyhow::Result<Role>;
    async fn update_role(&self, r: &Role) -> anyhow::Result<()>;
}

#[async_trait]
pub trait PaymentMethodsRepository: Send + Sync {
    async fn find_payment_method(&self, id: i64) -> anyhow::Result<Option<PaymentMethod>>;
    async fn list_payment_methods(
        &self,
        limit: u32,
        offset: u32,
    ) -> anyhow::Result<Vec<PaymentMethod>>;
    async fn insert_payment_method(&self, new: NewPaymentMethod) -> anyhow::Result<PaymentMethod>;
    async fn update_payment_method(&self, m: &PaymentMethod) -> anyhow::Result<()>;
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_user(&self, id: i64) -> anyhow::Result<Option<User>>;
    async fn list_users(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<User>>;
    /// Caller guarantees `new.role_id` exists.
    async fn insert_user(&self, new: NewUser) -> anyhow::Result<User>;
    /// Writes profile fields, role reference and active flag.
    async fn update_user(&self, u: &User) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ProductsRepository: Send + Sync {
    async fn find_product(&self, id: i64) -> anyhow::Result<Option<Product>>;
    async fn list_products(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Product>>;
    async fn insert_product(&self, new: NewProduct) -> anyhow::Result<Product>;
    async fn update_product(&self, p: &Product) -> anyhow::Result<()>;
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn find_inventory(&self, id: i64) -> anyhow::Result<Option<Inventory>>;
    async fn list_inventory(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Inventory>>;
    async fn insert_inventory(&self, new: NewInventory) -> anyhow::Result<Inventory>;
    /// All records satisfying the lookup, in store iteration order.
    async fn find_matching(&self, lookup: &InventoryLookup) -> anyhow::Result<Vec<Inventory>>;

    /// Records whose product name contains `term`.
    async fn find_by_name(&self, term: &str) -> anyhow::Result<Vec<Inventory>> {
        self.find_matching(&InventoryLookup::NameContains(term.to_string()))
            .await
    }

    /// Records whose product belongs to `category` (compared by id).
    async fn find_by_category(&self, category: &Category) -> anyhow::Result<Vec<Inventory>> {
        self.find_matching(&InventoryLookup::InCategory(category.clone()))
            .await
    }
}

#[async_trait]
pub trait OrdersRepository: Send + Sync {
    async fn find_order(&self, id: i32) -> anyhow::Result<Option<Order>>;
    async fn list_orders(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Order>>;
    async fn insert_order(&self, new: NewOrder) -> anyhow::Result<Order>;
}

#[async_trait]
pub trait SalesReceiptsRepository: Send + Sync {
    async fn find_receipt(&self, id: i64) -> anyhow::Result<Option<SalesReceipt>>;
    async fn list_receipts(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<SalesReceipt>>;
    async fn insert_receipt(&self, new: NewSalesReceipt) -> anyhow::Result<SalesReceipt>;
}

/// Everything the market service persists, behind one handle.
pub trait MarketRepository:
    CategoriesRepository
    + RolesRepository
    + PaymentMethodsRepository
    + UsersRepository
    + ProductsRepository
    + InventoryRepository
    + OrdersRepository
    + SalesReceiptsRepository
{
}

impl<T> MarketRepository for T where
    T: CategoriesRepository
        + RolesRepository
        + PaymentMethodsRepository
        + UsersRepository
        + ProductsRepository
        + InventoryRepository
        + OrdersRepository
        + SalesReceiptsRepository
{
}
