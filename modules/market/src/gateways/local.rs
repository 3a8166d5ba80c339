use std::sync::Arc;

use async_trait::async_trait;

use crate::api::dto::{
    CategoryDto, ChangeUserRoleReq, CreateCategoryReq, CreateInventoryReq,
    CreatePaymentMethodReq, CreateProductReq, CreateRoleReq, CreateUserReq, InventoryDto,
    IssueReceiptReq, OrderDto, PaymentMethodDto, PlaceOrderReq, ProductDto, RoleDto,
    SalesReceiptDto, UpdateCategoryReq, UpdatePaymentMethodReq, UpdateProductReq,
    UpdateRoleReq, UpdateUserReq, UserDto,
};
use crate::contract::{client::MarketApi, error::MarketError};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of [`MarketApi`] that delegates to the domain service and
/// projects the results.
pub struct MarketLocalClient {
    service: Arc<Service>,
}

impl MarketLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error(domain_error: DomainError) -> anyhow::Error {
    anyhow::Error::new(MarketError::from(domain_error))
}

fn project_all<'a, T: 'a, D: From<&'a T>>(items: &'a [T]) -> Vec<D> {
    items.iter().map(D::from).collect()
}

#[async_trait]
impl MarketApi for MarketLocalClient {
    async fn list_categories(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<CategoryDto>> {
        let items = self
            .service
            .list_categories(limit, offset)
            .await
            .map_err(map_domain_error)?;
        Ok(project_all(&items))
    }

    async fn get_category(&self, id: i64) -> anyhow::Result<CategoryDto> {
        let c = self.service.get_category(id).await.map_err(map_domain_error)?;
        Ok(CategoryDto::from(&c))
    }

    async fn create_category(&self, req: CreateCategoryReq) -> anyhow::Result<CategoryDto> {
        let c = self
            .service
            .create_category(req.into())
            .await
            .map_err(map_domain_error)?;
        Ok(CategoryDto::from(&c))
    }

    async fn update_category(
        &self,
        id: i64,
        req: UpdateCategoryReq,
    ) -> anyhow::Result<CategoryDto> {
        let c = self
            .service
            .update_category(id, req.into())
            .await
            .map_err(map_domain_error)?;
        Ok(CategoryDto::from(&c))
    }

    async fn set_category_active(&self, id: i64, active: bool) -> anyhow::Result<CategoryDto> {
        let c = self
            .service
            .set_category_active(id, active)
            .await
            .map_err(map_domain_error)?;
        Ok(CategoryDto::from(&c))
    }

    async fn list_roles(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<RoleDto>> {
        let items = self
            .service
            .list_roles(limit, offset)
            .await
            .map_err(map_domain_error)?;
        Ok(project_all(&items))
    }

    async fn get_role(&self, id: i64) -> anyhow::Result<RoleDto> {
        let r = self.service.get_role(id).await.map_err(map_domain_error)?;
        Ok(RoleDto::from(&r))
    }

    async fn create_role(&self, req: CreateRoleReq) -> anyhow::Result<RoleDto> {
        let r = self
            .service
            .create_role(req.into())
            .await
            .map_err(map_domain_error)?;
        Ok(RoleDto::from(&r))
    }

    async fn update_role(&self, id: i64, req: UpdateRoleReq) -> anyhow::Result<RoleDto> {
        let r = self
            .service
            .update_role(id, req.into())
            .await
            .map_err(map_domain_error)?;
        Ok(RoleDto::from(&r))
    }

    async fn set_role_active(&self, id: i64, active: bool) -> anyhow::Result<RoleDto> {
        let r = self
            .service
            .set_role_active(id, active)
            .await
            .map_err(map_domain_error)?;
        Ok(RoleDto::from(&r))
    }

    async fn list_payment_methods(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<PaymentMethodDto>> {
        let items = self
            .service
            .list_payment_methods(limit, offset)
            .await
            .map_err(map_domain_error)?;
        Ok(project_all(&items))
    }

    async fn get_payment_method(&self, id: i64) -> anyhow::Result<PaymentMethodDto> {
        let m = self
            .service
            .get_payment_method(id)
            .await
            .map_err(map_domain_error)?;
        Ok(PaymentMethodDto::from(&m))
    }

    async fn create_payment_method(
        &self,
        req: CreatePaymentMethodReq,
    ) -> anyhow::Result<PaymentMethodDto> {
        let m = self
            .service
            .create_payment_method(req.into())
            .await
            .map_err(map_domain_error)?;
        Ok(PaymentMethodDto::from(&m))
    }

    async fn update_payment_method(
        &self,
        id: i64,
        req: UpdatePaymentMethodReq,
    ) -> anyhow::Result<PaymentMethodDto> {
        let m = self
            .service
            .update_payment_method(id, req.into())
            .await
            .map_err(map_domain_error)?;
        Ok(PaymentMethodDto::from(&m))
    }

    async fn set_payment_method_active(
        &self,
        id: i64,
        active: bool,
    ) -> anyhow::Result<PaymentMethodDto> {
        let m = self
            .service
            .set_payment_method_active(id, active)
            .await
            .map_err(map_domain_error)?;
        Ok(PaymentMethodDto::from(&m))
    }

    async fn list_users(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<UserDto>> {
        let items = self
            .service
            .list_users(limit, offset)
            .await
            .map_err(map_domain_error)?;
        Ok(project_all(&items))
    }

    async fn get_user(&self, id: i64) -> anyhow::Result<UserDto> {
        let u = self.service.get_user(id).await.map_err(map_domain_error)?;
        Ok(UserDto::from(&u))
    }

    async fn create_user(&self, req: CreateUserReq) -> anyhow::Result<UserDto> {
        let u = self
            .service
            .create_user(req.into())
            .await
            .map_err(map_domain_error)?;
        Ok(UserDto::from(&u))
    }

    async fn update_user(&self, id: i64, req: UpdateUserReq) -> anyhow::Result<UserDto> {
        let u = self
            .service
            .update_user(id, req.into())
            .await
            .map_err(map_domain_error)?;
        Ok(UserDto::from(&u))
    }

    async fn change_user_role(&self, req: ChangeUserRoleReq) -> anyhow::Result<UserDto> {
        let u = self
            .service
            .change_user_role(req.id_usuario, req.id_rol)
            .await
            .map_err(map_domain_error)?;
        Ok(UserDto::from(&u))
    }

    async fn set_user_active(&self, id: i64, active: bool) -> anyhow::Result<UserDto> {
        let u = self
            .service
            .set_user_active(id, active)
            .await
            .map_err(map_domain_error)?;
        Ok(UserDto::from(&u))
    }

    async fn list_products(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<ProductDto>> {
        let items = self
            .service
            .list_products(limit, offset)
            .await
            .map_err(map_domain_error)?;
        Ok(project_all(&items))
    }

    async fn get_product(&self, id: i64) -> anyhow::Result<ProductDto> {
        let p = self.service.get_product(id).await.map_err(map_domain_error)?;
        Ok(ProductDto::from(&p))
    }

    async fn create_product(&self, req: CreateProductReq) -> anyhow::Result<ProductDto> {
        let p = self
            .service
            .create_product(req.into())
            .await
            .map_err(map_domain_error)?;
        Ok(ProductDto::from(&p))
    }

    async fn update_product(&self, id: i64, req: UpdateProductReq) -> anyhow::Result<ProductDto> {
        let (patch, category_id) = req.into_parts();
        let p = self
            .service
            .update_product(id, patch, category_id)
            .await
            .map_err(map_domain_error)?;
        Ok(ProductDto::from(&p))
    }

    async fn list_inventory(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<InventoryDto>> {
        let items = self
            .service
            .list_inventory(limit, offset)
            .await
            .map_err(map_domain_error)?;
        Ok(project_all(&items))
    }

    async fn get_inventory(&self, id: i64) -> anyhow::Result<InventoryDto> {
        let i = self
            .service
            .get_inventory(id)
            .await
            .map_err(map_domain_error)?;
        Ok(InventoryDto::from(&i))
    }

    async fn add_inventory(&self, req: CreateInventoryReq) -> anyhow::Result<InventoryDto> {
        let i = self
            .service
            .add_inventory(req.into())
            .await
            .map_err(map_domain_error)?;
        Ok(InventoryDto::from(&i))
    }

    async fn search_inventory_by_name(&self, term: &str) -> anyhow::Result<Vec<InventoryDto>> {
        let items = self
            .service
            .search_inventory_by_name(term)
            .await
            .map_err(map_domain_error)?;
        Ok(project_all(&items))
    }

    async fn inventory_by_category(
        &self,
        category_id: i64,
    ) -> anyhow::Result<Vec<InventoryDto>> {
        let items = self
            .service
            .inventory_by_category(category_id)
            .await
            .map_err(map_domain_error)?;
        Ok(project_all(&items))
    }

    async fn list_orders(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<OrderDto>> {
        let items = self
            .service
            .list_orders(limit, offset)
            .await
            .map_err(map_domain_error)?;
        Ok(project_all(&items))
    }

    async fn get_order(&self, id: i32) -> anyhow::Result<OrderDto> {
        let o = self.service.get_order(id).await.map_err(map_domain_error)?;
        Ok(OrderDto::from(&o))
    }

    async fn place_order(&self, req: PlaceOrderReq) -> anyhow::Result<OrderDto> {
        let o = self
            .service
            .place_order(req.id_usuario, req.total)
            .await
            .map_err(map_domain_error)?;
        Ok(OrderDto::from(&o))
    }

    async fn list_receipts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<SalesReceiptDto>> {
        let items = self
            .service
            .list_receipts(limit, offset)
            .await
            .map_err(map_domain_error)?;
        Ok(project_all(&items))
    }

    async fn get_receipt(&self, id: i64) -> anyhow::Result<SalesReceiptDto> {
        let r = self
            .service
            .get_receipt(id)
            .await
            .map_err(map_domain_error)?;
        Ok(SalesReceiptDto::from(&r))
    }

    async fn issue_receipt(&self, req: IssueReceiptReq) -> anyhow::Result<SalesReceiptDto> {
        let r = self
            .service
            .issue_receipt(req.id_pedido, req.total)
            .await
            .map_err(map_domain_error)?;
        Ok(SalesReceiptDto::from(&r))
    }
}
