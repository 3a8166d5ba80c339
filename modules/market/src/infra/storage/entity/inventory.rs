use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use crate::contract::model::NewInventory;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventario")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "id_inventario")]
    pub id: i64,
    #[sea_orm(column_name = "id_producto")]
    pub product_id: i64,
    pub stock: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewInventory> for ActiveModel {
    fn from(new: NewInventory) -> Self {
        Self {
            id: NotSet,
            product_id: Set(new.product_id),
            stock: Set(new.stock),
        }
    }
}
