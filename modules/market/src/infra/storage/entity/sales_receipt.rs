use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use crate::contract::model::NewSalesReceipt;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comprobantes_venta")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "id_comprobante")]
    pub id: i64,
    #[sea_orm(column_name = "id_pedido", nullable)]
    pub order_id: Option<i32>,
    #[sea_orm(column_name = "fecha_emision")]
    pub issued_at: DateTime,
    #[sea_orm(column_type = "Double")]
    pub total: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewSalesReceipt> for ActiveModel {
    fn from(new: NewSalesReceipt) -> Self {
        Self {
            id: NotSet,
            order_id: Set(new.order_id),
            issued_at: Set(new.issued_at),
            total: Set(new.total),
        }
    }
}
