use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::contract::model::{
    Category, CategoryPatch, Inventory, NewCategory, NewInventory, NewOrder, NewPaymentMethod,
    NewProduct, NewRole, NewSalesReceipt, NewUser, Order, PaymentMethod, PaymentMethodPatch,
    Product, ProductPatch, Role, RolePatch, SalesReceipt, User, UserPatch,
};
use crate::domain::error::DomainError;
use crate::domain::lookup::InventoryLookup;
use crate::domain::repo::MarketRepository;

/// Domain service for the market: existence checks, change-set application and lookups.
/// Depends only on the repository ports, not on infra types.
///
/// Field contents are never validated here; an empty string in a change-set is stored as-is.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn MarketRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 1000,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn MarketRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// Effective (limit, offset): missing limit falls back to the default page size, and
    /// every limit is capped at the maximum.
    fn page(&self, limit: Option<u32>, offset: Option<u32>) -> (u32, u32) {
        let limit = limit
            .unwrap_or(self.config.default_page_size)
            .min(self.config.max_page_size);
        (limit, offset.unwrap_or(0))
    }

    // --- categories ---

    #[instrument(name = "market.service.list_categories", skip(self))]
    pub async fn list_categories(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Category>, DomainError> {
        let (limit, offset) = self.page(limit, offset);
        let items = self
            .repo
            .list_categories(limit, offset)
            .await
            .map_err(DomainError::from)?;
        debug!("Listed {} categories", items.len());
        Ok(items)
    }

    #[instrument(name = "market.service.get_category", skip(self), fields(category_id = id))]
    pub async fn get_category(&self, id: i64) -> Result<Category, DomainError> {
        debug!("Getting category by id");
        self.repo
            .find_category(id)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| DomainError::category_not_found(id))
    }

    #[instrument(
        name = "market.service.create_category",
        skip(self, new),
        fields(name = %new.name)
    )]
    pub async fn create_category(&self, new: NewCategory) -> Result<Category, DomainError> {
        info!("Creating category");
        let created = self
            .repo
            .insert_category(new)
            .await
            .map_err(DomainError::from)?;
        info!("Created category with id={}", created.id);
        Ok(created)
    }

    #[instrument(name = "market.service.update_category", skip(self, patch), fields(category_id = id))]
    pub async fn update_category(
        &self,
        id: i64,
        patch: CategoryPatch,
    ) -> Result<Category, DomainError> {
        info!("Updating category");
        let mut current = self.get_category(id).await?;
        current.apply_patch(patch);
        self.repo
            .update_category(&current)
            .await
            .map_err(DomainError::from)?;
        Ok(current)
    }

    #[instrument(name = "market.service.set_category_active", skip(self), fields(category_id = id))]
    pub async fn set_category_active(
        &self,
        id: i64,
        active: bool,
    ) -> Result<Category, DomainError> {
        info!("Setting category active={}", active);
        let mut current = self.get_category(id).await?;
        current.active = active;
        self.repo
            .update_category(&current)
            .await
            .map_err(DomainError::from)?;
        Ok(current)
    }

    // --- roles ---

    #[instrument(name = "market.service.list_roles", skip(self))]
    pub async fn list_roles(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Role>, DomainError> {
        let (limit, offset) = self.page(limit, offset);
        let items = self
            .repo
            .list_roles(limit, offset)
            .await
            .map_err(DomainError::from)?;
        debug!("Listed {} roles", items.len());
        Ok(items)
    }

    #[instrument(name = "market.service.get_role", skip(self), fields(role_id = id))]
    pub async fn get_role(&self, id: i64) -> Result<Role, DomainError> {
        debug!("Getting role by id");
        self.repo
            .find_role(id)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| DomainError::role_not_found(id))
    }

    #[instrument(name = "market.service.create_role", skip(self, new), fields(name = %new.name))]
    pub async fn create_role(&self, new: NewRole) -> Result<Role, DomainError> {
        info!("Creating role");
        let created = self
            .repo
            .insert_role(new)
            .await
            .map_err(DomainError::from)?;
        info!("Created role with id={}", created.id);
        Ok(created)
    }

    #[instrument(name = "market.service.update_role", skip(self, patch), fields(role_id = id))]
    pub async fn update_role(&self, id: i64, patch: RolePatch) -> Result<Role, DomainError> {
        info!("Updating role");
        let mut current = self.get_role(id).await?;
        current.apply_patch(patch);
        self.repo
            .update_role(&current)
            .await
            .map_err(DomainError::from)?;
        Ok(current)
    }

    #[instrument(name = "market.service.set_role_active", skip(self), fields(role_id = id))]
    pub async fn set_role_active(&self, id: i64, active: bool) -> Result<Role, DomainError> {
        info!("Setting role active={}", active);
        let mut current = self.get_role(id).await?;
        current.active = active;
        self.repo
            .update_role(&current)
            .await
            .map_err(DomainError::from)?;
        Ok(current)
    }

    // --- payment methods ---

    #[instrument(name = "market.service.list_payment_methods", skip(self))]
    pub async fn list_payment_methods(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<PaymentMethod>, DomainError> {
        let (limit, offset) = self.page(limit, offset);
        let items = self
            .repo
            .list_payment_methods(limit, offset)
            .await
            .map_err(DomainError::from)?;
        debug!("Listed {} payment methods", items.len());
        Ok(items)
    }

    #[instrument(
        name = "market.service.get_payment_method",
        skip(self),
        fields(payment_method_id = id)
    )]
    pub async fn get_payment_method(&self, id: i64) -> Result<PaymentMethod, DomainError> {
        debug!("Getting payment method by id");
        self.repo
            .find_payment_method(id)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| DomainError::payment_method_not_found(id))
    }

    #[instrument(
        name = "market.service.create_payment_method",
        skip(self, new),
        fields(name = %new.name)
    )]
    pub async fn create_payment_method(
        &self,
        new: NewPaymentMethod,
    ) -> Result<PaymentMethod, DomainError> {
        info!("Creating payment method");
        let created = self
            .repo
            .insert_payment_method(new)
            .await
            .map_err(DomainError::from)?;
        info!("Created payment method with id={}", created.id);
        Ok(created)
    }

    #[instrument(
        name = "market.service.update_payment_method",
        skip(self, patch),
        fields(payment_method_id = id)
    )]
    pub async fn update_payment_method(
        &self,
        id: i64,
        patch: PaymentMethodPatch,
    ) -> Result<PaymentMethod, DomainError> {
        info!("Updating payment method");
        let mut current = self.get_payment_method(id).await?;
        current.apply_patch(patch);
        self.repo
            .update_payment_method(&current)
            .await
            .map_err(DomainError::from)?;
        Ok(current)
    }

    #[instrument(
        name = "market.service.set_payment_method_active",
        skip(self),
        fields(payment_method_id = id)
    )]
    pub async fn set_payment_method_active(
        &self,
        id: i64,
        active: bool,
    ) -> Result<PaymentMethod, DomainError> {
        info!("Setting payment method active={}", active);
        let mut current = self.get_payment_method(id).await?;
        current.active = active;
        self.repo
            .update_payment_method(&current)
            .await
            .map_err(DomainError::from)?;
        Ok(current)
    }

    // --- users ---

    #[instrument(name = "market.service.list_users", skip(self))]
    pub async fn list_users(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<User>, DomainError> {
        let (limit, offset) = self.page(limit, offset);
        let items = self
            .repo
            .list_users(limit, offset)
            .await
            .map_err(DomainError::from)?;
        debug!("Listed {} users", items.len());
        Ok(items)
    }

    #[instrument(name = "market.service.get_user", skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        debug!("Getting user by id");
        self.repo
            .find_user(id)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(
        name = "market.service.create_user",
        skip(self, new),
        fields(email = %new.email, role_id = new.role_id)
    )]
    pub async fn create_user(&self, new: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");
        self.get_role(new.role_id).await?;
        let created = self
            .repo
            .insert_user(new)
            .await
            .map_err(DomainError::from)?;
        info!("Created user with id={}", created.id);
        Ok(created)
    }

    #[instrument(name = "market.service.update_user", skip(self, patch), fields(user_id = id))]
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");
        let mut current = self.get_user(id).await?;
        current.apply_patch(patch);
        self.repo
            .update_user(&current)
            .await
            .map_err(DomainError::from)?;
        Ok(current)
    }

    #[instrument(
        name = "market.service.change_user_role",
        skip(self),
        fields(user_id = id)
    )]
    pub async fn change_user_role(&self, id: i64, role_id: i64) -> Result<User, DomainError> {
        info!("Changing user role");
        let mut current = self.get_user(id).await?;
        current.role = self.get_role(role_id).await?;
        self.repo
            .update_user(&current)
            .await
            .map_err(DomainError::from)?;
        Ok(current)
    }

    #[instrument(name = "market.service.set_user_active", skip(self), fields(user_id = id))]
    pub async fn set_user_active(&self, id: i64, active: bool) -> Result<User, DomainError> {
        info!("Setting user active={}", active);
        let mut current = self.get_user(id).await?;
        current.active = active;
        self.repo
            .update_user(&current)
            .await
            .map_err(DomainError::from)?;
        Ok(current)
    }

    // --- products ---

    #[instrument(name = "market.service.list_products", skip(self))]
    pub async fn list_products(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Product>, DomainError> {
        let (limit, offset) = self.page(limit, offset);
        let items = self
            .repo
            .list_products(limit, offset)
            .await
            .map_err(DomainError::from)?;
        debug!("Listed {} products", items.len());
        Ok(items)
    }

    #[instrument(name = "market.service.get_product", skip(self), fields(product_id = id))]
    pub async fn get_product(&self, id: i64) -> Result<Product, DomainError> {
        debug!("Getting product by id");
        self.repo
            .find_product(id)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| DomainError::product_not_found(id))
    }

    #[instrument(
        name = "market.service.create_product",
        skip(self, new),
        fields(name = %new.name, category_id = new.category_id)
    )]
    pub async fn create_product(&self, new: NewProduct) -> Result<Product, DomainError> {
        info!("Creating product");
        self.get_category(new.category_id).await?;
        let created = self
            .repo
            .insert_product(new)
            .await
            .map_err(DomainError::from)?;
        info!("Created product with id={}", created.id);
        Ok(created)
    }

    /// `category_id`, when present, is resolved before the change-set is applied.
    #[instrument(
        name = "market.service.update_product",
        skip(self, patch),
        fields(product_id = id)
    )]
    pub async fn update_product(
        &self,
        id: i64,
        mut patch: ProductPatch,
        category_id: Option<i64>,
    ) -> Result<Product, DomainError> {
        info!("Updating product");
        let mut current = self.get_product(id).await?;
        if let Some(category_id) = category_id {
            patch.category = Some(self.get_category(category_id).await?);
        }
        current.apply_patch(patch);
        self.repo
            .update_product(&current)
            .await
            .map_err(DomainError::from)?;
        Ok(current)
    }

    // --- inventory ---

    #[instrument(name = "market.service.list_inventory", skip(self))]
    pub async fn list_inventory(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Inventory>, DomainError> {
        let (limit, offset) = self.page(limit, offset);
        let items = self
            .repo
            .list_inventory(limit, offset)
            .await
            .map_err(DomainError::from)?;
        debug!("Listed {} inventory records", items.len());
        Ok(items)
    }

    #[instrument(name = "market.service.get_inventory", skip(self), fields(inventory_id = id))]
    pub async fn get_inventory(&self, id: i64) -> Result<Inventory, DomainError> {
        debug!("Getting inventory record by id");
        self.repo
            .find_inventory(id)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| DomainError::inventory_not_found(id))
    }

    #[instrument(
        name = "market.service.add_inventory",
        skip(self, new),
        fields(product_id = new.product_id, stock = new.stock)
    )]
    pub async fn add_inventory(&self, new: NewInventory) -> Result<Inventory, DomainError> {
        info!("Adding inventory record");
        self.get_product(new.product_id).await?;
        let created = self
            .repo
            .insert_inventory(new)
            .await
            .map_err(DomainError::from)?;
        info!("Created inventory record with id={}", created.id);
        Ok(created)
    }

    /// Every record whose product name contains `term`; an empty term returns all records.
    #[instrument(name = "market.service.search_inventory_by_name", skip(self))]
    pub async fn search_inventory_by_name(
        &self,
        term: &str,
    ) -> Result<Vec<Inventory>, DomainError> {
        let items = self
            .repo
            .find_by_name(term)
            .await
            .map_err(DomainError::from)?;
        debug!("Found {} inventory records", items.len());
        Ok(items)
    }

    #[instrument(name = "market.service.inventory_by_category", skip(self))]
    pub async fn inventory_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<Inventory>, DomainError> {
        let category = self.get_category(category_id).await?;
        let lookup = InventoryLookup::InCategory(category);
        debug!(lookup = %lookup.describe(), "Running inventory lookup");
        let items = self
            .repo
            .find_matching(&lookup)
            .await
            .map_err(DomainError::from)?;
        debug!("Found {} inventory records", items.len());
        Ok(items)
    }

    // --- orders ---

    #[instrument(name = "market.service.list_orders", skip(self))]
    pub async fn list_orders(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Order>, DomainError> {
        let (limit, offset) = self.page(limit, offset);
        let items = self
            .repo
            .list_orders(limit, offset)
            .await
            .map_err(DomainError::from)?;
        debug!("Listed {} orders", items.len());
        Ok(items)
    }

    #[instrument(name = "market.service.get_order", skip(self), fields(order_id = id))]
    pub async fn get_order(&self, id: i32) -> Result<Order, DomainError> {
        debug!("Getting order by id");
        self.repo
            .find_order(id)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| DomainError::order_not_found(id))
    }

    #[instrument(name = "market.service.place_order", skip(self))]
    pub async fn place_order(&self, user_id: i64, total: f64) -> Result<Order, DomainError> {
        info!("Placing order");
        self.get_user(user_id).await?;
        let new = NewOrder {
            user_id,
            placed_at: Utc::now().naive_utc(),
            total,
        };
        let created = self
            .repo
            .insert_order(new)
            .await
            .map_err(DomainError::from)?;
        info!("Placed order with id={}", created.id);
        Ok(created)
    }

    // --- sales receipts ---

    #[instrument(name = "market.service.list_receipts", skip(self))]
    pub async fn list_receipts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<SalesReceipt>, DomainError> {
        let (limit, offset) = self.page(limit, offset);
        let items = self
            .repo
            .list_receipts(limit, offset)
            .await
            .map_err(DomainError::from)?;
        debug!("Listed {} receipts", items.len());
        Ok(items)
    }

    #[instrument(name = "market.service.get_receipt", skip(self), fields(receipt_id = id))]
    pub async fn get_receipt(&self, id: i64) -> Result<SalesReceipt, DomainError> {
        debug!("Getting receipt by id");
        self.repo
            .find_receipt(id)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| DomainError::receipt_not_found(id))
    }

    /// Issue a receipt, optionally tied to an existing order.
    #[instrument(name = "market.service.issue_receipt", skip(self))]
    pub async fn issue_receipt(
        &self,
        order_id: Option<i32>,
        total: f64,
    ) -> Result<SalesReceipt, DomainError> {
        info!("Issuing receipt");
        if let Some(order_id) = order_id {
            self.get_order(order_id).await?;
        }
        let new = NewSalesReceipt {
            order_id,
            issued_at: Utc::now().naive_utc(),
            total,
        };
        let created = self
            .repo
            .insert_receipt(new)
            .await
            .map_err(DomainError::from)?;
        info!("Issued receipt with id={}", created.id);
        Ok(created)
    }
}
