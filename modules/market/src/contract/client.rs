use async_trait::async_trait;

use crate::api::dto::{
    CategoryDto, ChangeUserRoleReq, CreateCategoryReq, CreateInventoryReq,
    CreatePaymentMethodReq, CreateProductReq, CreateRoleReq, CreateUserReq, InventoryDto,
    IssueReceiptReq, OrderDto, PaymentMethodDto, PlaceOrderReq, ProductDto, RoleDto,
    SalesReceiptDto, UpdateCategoryReq, UpdatePaymentMethodReq, UpdateProductReq,
    UpdateRoleReq, UpdateUserReq, UserDto,
};

/// Public API of the market module for in-process consumers.
///
/// Results are projections. Errors carry a [`crate::contract::error::MarketError`] that can be
/// recovered with `downcast_ref`.
#[async_trait]
pub trait MarketApi: Send + Sync {
    async fn list_categories(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<CategoryDto>>;
    async fn get_category(&self, id: i64) -> anyhow::Result<CategoryDto>;
    async fn create_category(&self, req: CreateCategoryReq) -> anyhow::Result<CategoryDto>;
    /// Absent fields keep their current value.
    async fn update_category(&self, id: i64, req: UpdateCategoryReq)
        -> anyhow::Result<CategoryDto>;
    async fn set_category_active(&self, id: i64, active: bool) -> anyhow::Result<CategoryDto>;

    async fn list_roles(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<RoleDto>>;
    async fn get_role(&self, id: i64) -> anyhow::Result<RoleDto>;
    async fn create_role(&self, req: CreateRoleReq) -> anyhow::Result<RoleDto>;
    async fn update_role(&self, id: i64, req: UpdateRoleReq) -> anyhow::Result<RoleDto>;
    async fn set_role_active(&self, id: i64, active: bool) -> anyhow::Result<RoleDto>;

    async fn list_payment_methods(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<PaymentMethodDto>>;
    async fn get_payment_method(&self, id: i64) -> anyhow::Result<PaymentMethodDto>;
    async fn create_payment_method(
        &self,
        req: CreatePaymentMethodReq,
    ) -> anyhow::Result<PaymentMethodDto>;
    async fn update_payment_method(
        &self,
        id: i64,
        req: UpdatePaymentMethodReq,
    ) -> anyhow::Result<PaymentMethodDto>;
    async fn set_payment_method_active(
        &self,
        id: i64,
        active: bool,
    ) -> anyhow::Result<PaymentMethodDto>;

    async fn list_users(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<UserDto>>;
    async fn get_user(&self, id: i64) -> anyhow::Result<UserDto>;
    async fn create_user(&self, req: CreateUserReq) -> anyhow::Result<UserDto>;
    async fn update_user(&self, id: i64, req: UpdateUserReq) -> anyhow::Result<UserDto>;
    async fn change_user_role(&self, req: ChangeUserRoleReq) -> anyhow::Result<UserDto>;
    async fn set_user_active(&self, id: i64, active: bool) -> anyhow::Result<UserDto>;

    async fn list_products(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<ProductDto>>;
    async fn get_product(&self, id: i64) -> anyhow::Result<ProductDto>;
    async fn create_product(&self, req: CreateProductReq) -> anyhow::Result<ProductDto>;
    async fn update_product(&self, id: i64, req: UpdateProductReq) -> anyhow::Result<ProductDto>;

    async fn list_inventory(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<InventoryDto>>;
    async fn get_inventory(&self, id: i64) -> anyhow::Result<InventoryDto>;
    async fn add_inventory(&self, req: CreateInventoryReq) -> anyhow::Result<InventoryDto>;
    /// Records whose product name contains `term`. An empty term lists everything.
    async fn search_inventory_by_name(&self, term: &str) -> anyhow::Result<Vec<InventoryDto>>;
    async fn inventory_by_category(&self, category_id: i64)
        -> anyhow::Result<Vec<InventoryDto>>;

    async fn list_orders(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<OrderDto>>;
    async fn get_order(&self, id: i32) -> anyhow::Result<OrderDto>;
    async fn place_order(&self, req: PlaceOrderReq) -> anyhow::Result<OrderDto>;

    async fn list_receipts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<SalesReceiptDto>>;
    async fn get_receipt(&self, id: i64) -> anyhow::Result<SalesReceiptDto>;
    async fn issue_receipt(&self, req: IssueReceiptReq) -> anyhow::Result<SalesReceiptDto>;
}
