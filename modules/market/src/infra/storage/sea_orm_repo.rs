//! SeaORM-backed implementation of every market port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection` or a
//! transaction. Related records are loaded with deduplicated `IN (...)` batches and stitched
//! together in memory, so every entity handed back is fully resolved.

use std::collections::{BTreeSet, HashMap};

use anyhow::{anyhow, Context};
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use crate::contract::model::{
    Category, Inventory, NewCategory, NewInventory, NewOrder, NewPaymentMethod, NewProduct,
    NewRole, NewSalesReceipt, NewUser, Order, PaymentMethod, Product, Role, SalesReceipt, User,
};
use crate::domain::lookup::InventoryLookup;
use crate::domain::repo::{
    CategoriesRepository, InventoryRepository, OrdersRepository, PaymentMethodsRepository,
    ProductsRepository, RolesRepository, SalesReceiptsRepository, UsersRepository,
};
use crate::infra::storage::entity::{
    category, inventory, order, payment_method, product, role, sales_receipt, user,
};
use crate::infra::storage::mapper;

/// Upper bound on ids per `IN (...)` list. Well below the bind limits of
/// SQLite (32766) and PostgreSQL (65535).
const ID_BATCH: usize = 500;

/// Distinct ids in ascending order, split into `IN (...)`-sized batches.
fn id_batches<T: Ord + Clone>(ids: impl IntoIterator<Item = T>) -> Vec<Vec<T>> {
    let unique: Vec<T> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    unique.chunks(ID_BATCH).map(<[T]>::to_vec).collect()
}

/// `%term%` with the term's own `%`, `_` and `\` escaped; pair with `ESCAPE '\'`.
fn like_contains(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmMarketRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmMarketRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    async fn categories_by_id(&self, ids: Vec<i64>) -> anyhow::Result<HashMap<i64, Category>> {
        let mut found = HashMap::new();
        for batch in id_batches(ids) {
            let rows = category::Entity::find()
                .filter(category::Column::Id.is_in(batch))
                .all(&self.conn)
                .await
                .context("load categories failed")?;
            found.extend(rows.into_iter().map(|m| (m.id, Category::from(m))));
        }
        Ok(found)
    }

    async fn roles_by_id(&self, ids: Vec<i64>) -> anyhow::Result<HashMap<i64, Role>> {
        let mut found = HashMap::new();
        for batch in id_batches(ids) {
            let rows = role::Entity::find()
                .filter(role::Column::Id.is_in(batch))
                .all(&self.conn)
                .await
                .context("load roles failed")?;
            found.extend(rows.into_iter().map(|m| (m.id, Role::from(m))));
        }
        Ok(found)
    }

    async fn products_by_id(&self, ids: Vec<i64>) -> anyhow::Result<HashMap<i64, Product>> {
        let mut rows = Vec::new();
        for batch in id_batches(ids) {
            rows.extend(
                product::Entity::find()
                    .filter(product::Column::Id.is_in(batch))
                    .all(&self.conn)
                    .await
                    .context("load products failed")?,
            );
        }
        Ok(self
            .resolve_products(rows)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect())
    }

    async fn users_by_id(&self, ids: Vec<i64>) -> anyhow::Result<HashMap<i64, User>> {
        let mut rows = Vec::new();
        for batch in id_batches(ids) {
            rows.extend(
                user::Entity::find()
                    .filter(user::Column::Id.is_in(batch))
                    .all(&self.conn)
                    .await
                    .context("load users failed")?,
            );
        }
        Ok(self
            .resolve_users(rows)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect())
    }

    async fn orders_by_id(&self, ids: Vec<i32>) -> anyhow::Result<HashMap<i32, Order>> {
        let mut rows = Vec::new();
        for batch in id_batches(ids) {
            rows.extend(
                order::Entity::find()
                    .filter(order::Column::Id.is_in(batch))
                    .all(&self.conn)
                    .await
                    .context("load orders failed")?,
            );
        }
        Ok(self
            .resolve_orders(rows)
            .await?
            .into_iter()
            .map(|o| (o.id, o))
            .collect())
    }

    async fn resolve_users(&self, rows: Vec<user::Model>) -> anyhow::Result<Vec<User>> {
        let roles = self
            .roles_by_id(rows.iter().map(|u| u.role_id).collect())
            .await?;
        rows.into_iter()
            .map(|u| -> anyhow::Result<User> {
                let role = roles
                    .get(&u.role_id)
                    .cloned()
                    .ok_or_else(|| anyhow!("user {} references missing role {}", u.id, u.role_id))?;
                Ok(mapper::user_to_contract(u, role))
            })
            .collect()
    }

    async fn resolve_products(&self, rows: Vec<product::Model>) -> anyhow::Result<Vec<Product>> {
        let categories = self
            .categories_by_id(rows.iter().map(|p| p.category_id).collect())
            .await?;
        rows.into_iter()
            .map(|p| -> anyhow::Result<Product> {
                let category = categories.get(&p.category_id).cloned().ok_or_else(|| {
                    anyhow!(
                        "product {} references missing category {}",
                        p.id,
                        p.category_id
                    )
                })?;
                Ok(mapper::product_to_contract(p, category))
            })
            .collect()
    }

    async fn resolve_inventory(
        &self,
        rows: Vec<inventory::Model>,
    ) -> anyhow::Result<Vec<Inventory>> {
        let products = self
            .products_by_id(rows.iter().map(|i| i.product_id).collect())
            .await?;
        rows.into_iter()
            .map(|i| -> anyhow::Result<Inventory> {
                let product = products.get(&i.product_id).cloned().ok_or_else(|| {
                    anyhow!(
                        "inventory {} references missing product {}",
                        i.id,
                        i.product_id
                    )
                })?;
                Ok(mapper::inventory_to_contract(i, product))
            })
            .collect()
    }

    async fn resolve_orders(&self, rows: Vec<order::Model>) -> anyhow::Result<Vec<Order>> {
        let users = self
            .users_by_id(rows.iter().map(|o| o.user_id).collect())
            .await?;
        rows.into_iter()
            .map(|o| -> anyhow::Result<Order> {
                let user = users.get(&o.user_id).cloned().ok_or_else(|| {
                    anyhow!("order {} references missing user {}", o.id, o.user_id)
                })?;
                Ok(mapper::order_to_contract(o, user))
            })
            .collect()
    }

    async fn resolve_receipts(
        &self,
        rows: Vec<sales_receipt::Model>,
    ) -> anyhow::Result<Vec<SalesReceipt>> {
        let orders = self
            .orders_by_id(rows.iter().filter_map(|r| r.order_id).collect())
            .await?;
        rows.into_iter()
            .map(|r| -> anyhow::Result<SalesReceipt> {
                let order = match r.order_id {
                    None => None,
                    Some(order_id) => Some(orders.get(&order_id).cloned().ok_or_else(|| {
                        anyhow!("receipt {} references missing order {}", r.id, order_id)
                    })?),
                };
                Ok(mapper::receipt_to_contract(r, order))
            })
            .collect()
    }
}

fn page(limit: u32, offset: u32) -> (u64, u64) {
    (u64::from(limit), u64::from(offset))
}

#[async_trait::async_trait]
impl<C> CategoriesRepository for SeaOrmMarketRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_category(&self, id: i64) -> anyhow::Result<Option<Category>> {
        let found = category::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_category failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_categories(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Category>> {
        let (limit, offset) = page(limit, offset);
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("list_categories failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_category(&self, new: NewCategory) -> anyhow::Result<Category> {
        let m = category::ActiveModel::from(new)
            .insert(&self.conn)
            .await
            .context("insert_category failed")?;
        Ok(m.into())
    }

    async fn update_category(&self, c: &Category) -> anyhow::Result<()> {
        let _ = mapper::category_to_active(c)
            .update(&self.conn)
            .await
            .context("update_category failed")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl<C> RolesRepository for SeaOrmMarketRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_role(&self, id: i64) -> anyhow::Result<Option<Role>> {
        let found = role::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_role failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_roles(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Role>> {
        let (limit, offset) = page(limit, offset);
        let rows = role::Entity::find()
            .order_by_asc(role::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("list_roles failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_role(&self, new: NewRole) -> anyhow::Result<Role> {
        let m = role::ActiveModel::from(new)
            .insert(&self.conn)
            .await
            .context("insert_role failed")?;
        Ok(m.into())
    }

    async fn update_role(&self, r: &Role) -> anyhow::Result<()> {
        let _ = mapper::role_to_active(r)
            .update(&self.conn)
            .await
            .context("update_role failed")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl<C> PaymentMethodsRepository for SeaOrmMarketRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_payment_method(&self, id: i64) -> anyhow::Result<Option<PaymentMethod>> {
        let found = payment_method::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_payment_method failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_payment_methods(
        &self,
        limit: u32,
        offset: u32,
    ) -> anyhow::Result<Vec<PaymentMethod>> {
        let (limit, offset) = page(limit, offset);
        let rows = payment_method::Entity::find()
            .order_by_asc(payment_method::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("list_payment_methods failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_payment_method(&self, new: NewPaymentMethod) -> anyhow::Result<PaymentMethod> {
        let m = payment_method::ActiveModel::from(new)
            .insert(&self.conn)
            .await
            .context("insert_payment_method failed")?;
        Ok(m.into())
    }

    async fn update_payment_method(&self, m: &PaymentMethod) -> anyhow::Result<()> {
        let _ = mapper::payment_method_to_active(m)
            .update(&self.conn)
            .await
            .context("update_payment_method failed")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmMarketRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_user(&self, id: i64) -> anyhow::Result<Option<User>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_user failed")?;
        match found {
            Some(row) => Ok(self.resolve_users(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn list_users(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<User>> {
        let (limit, offset) = page(limit, offset);
        let rows = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("list_users failed")?;
        self.resolve_users(rows).await
    }

    async fn insert_user(&self, new: NewUser) -> anyhow::Result<User> {
        let m = user::ActiveModel::from(new)
            .insert(&self.conn)
            .await
            .context("insert_user failed")?;
        self.resolve_users(vec![m])
            .await?
            .into_iter()
            .next()
            .context("inserted user vanished")
    }

    async fn update_user(&self, u: &User) -> anyhow::Result<()> {
        let _ = mapper::user_to_active(u)
            .update(&self.conn)
            .await
            .context("update_user failed")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl<C> ProductsRepository for SeaOrmMarketRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_product(&self, id: i64) -> anyhow::Result<Option<Product>> {
        let found = product::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_product failed")?;
        match found {
            Some(row) => Ok(self.resolve_products(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn list_products(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Product>> {
        let (limit, offset) = page(limit, offset);
        let rows = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("list_products failed")?;
        self.resolve_products(rows).await
    }

    async fn insert_product(&self, new: NewProduct) -> anyhow::Result<Product> {
        let m = product::ActiveModel::from(new)
            .insert(&self.conn)
            .await
            .context("insert_product failed")?;
        self.resolve_products(vec![m])
            .await?
            .into_iter()
            .next()
            .context("inserted product vanished")
    }

    async fn update_product(&self, p: &Product) -> anyhow::Result<()> {
        let _ = mapper::product_to_active(p)
            .update(&self.conn)
            .await
            .context("update_product failed")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl<C> InventoryRepository for SeaOrmMarketRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_inventory(&self, id: i64) -> anyhow::Result<Option<Inventory>> {
        let found = inventory::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_inventory failed")?;
        match found {
            Some(row) => Ok(self.resolve_inventory(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn list_inventory(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Inventory>> {
        let (limit, offset) = page(limit, offset);
        let rows = inventory::Entity::find()
            .order_by_asc(inventory::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("list_inventory failed")?;
        self.resolve_inventory(rows).await
    }

    async fn insert_inventory(&self, new: NewInventory) -> anyhow::Result<Inventory> {
        let m = inventory::ActiveModel::from(new)
            .insert(&self.conn)
            .await
            .context("insert_inventory failed")?;
        self.resolve_inventory(vec![m])
            .await?
            .into_iter()
            .next()
            .context("inserted inventory vanished")
    }

    async fn find_matching(&self, lookup: &InventoryLookup) -> anyhow::Result<Vec<Inventory>> {
        let query = inventory::Entity::find()
            .join(JoinType::InnerJoin, inventory::Relation::Product.def());
        let query = match lookup {
            InventoryLookup::NameContains(term) => {
                query.filter(
                    product::Column::Name.like(LikeExpr::new(like_contains(term)).escape('\\')),
                )
            }
            InventoryLookup::InCategory(category) => {
                query.filter(product::Column::CategoryId.eq(category.id))
            }
        };
        let rows = query
            .order_by_asc(inventory::Column::Id)
            .all(&self.conn)
            .await
            .with_context(|| format!("find_matching failed ({})", lookup.describe()))?;
        self.resolve_inventory(rows).await
    }
}

#[async_trait::async_trait]
impl<C> OrdersRepository for SeaOrmMarketRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_order(&self, id: i32) -> anyhow::Result<Option<Order>> {
        let found = order::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_order failed")?;
        match found {
            Some(row) => Ok(self.resolve_orders(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn list_orders(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<Order>> {
        let (limit, offset) = page(limit, offset);
        let rows = order::Entity::find()
            .order_by_asc(order::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("list_orders failed")?;
        self.resolve_orders(rows).await
    }

    async fn insert_order(&self, new: NewOrder) -> anyhow::Result<Order> {
        let m = order::ActiveModel::from(new)
            .insert(&self.conn)
            .await
            .context("insert_order failed")?;
        self.resolve_orders(vec![m])
            .await?
            .into_iter()
            .next()
            .context("inserted order vanished")
    }
}

#[async_trait::async_trait]
impl<C> SalesReceiptsRepository for SeaOrmMarketRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_receipt(&self, id: i64) -> anyhow::Result<Option<SalesReceipt>> {
        let found = sales_receipt::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_receipt failed")?;
        match found {
            Some(row) => Ok(self.resolve_receipts(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn list_receipts(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<SalesReceipt>> {
        let (limit, offset) = page(limit, offset);
        let rows = sales_receipt::Entity::find()
            .order_by_asc(sales_receipt::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .context("list_receipts failed")?;
        self.resolve_receipts(rows).await
    }

    async fn insert_receipt(&self, new: NewSalesReceipt) -> anyhow::Result<SalesReceipt> {
        let m = sales_receipt::ActiveModel::from(new)
            .insert(&self.conn)
            .await
            .context("insert_receipt failed")?;
        self.resolve_receipts(vec![m])
            .await?
            .into_iter()
            .next()
            .context("inserted receipt vanished")
    }
}
