use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use crate::contract::model::NewOrder;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pedidos")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "id_pedido")]
    pub id: i32,
    #[sea_orm(column_name = "id_usuario")]
    pub user_id: i64,
    #[sea_orm(column_name = "fecha_pedido")]
    pub placed_at: DateTime,
    #[sea_orm(column_type = "Double")]
    pub total: f64,
    #[sea_orm(column_name = "estado")]
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::sales_receipt::Entity")]
    SalesReceipt,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::sales_receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesReceipt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewOrder> for ActiveModel {
    fn from(new: NewOrder) -> Self {
        Self {
            id: NotSet,
            user_id: Set(new.user_id),
            placed_at: Set(new.placed_at),
            total: Set(new.total),
            active: Set(true),
        }
    }
}
