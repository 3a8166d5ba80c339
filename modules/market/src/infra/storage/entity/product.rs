use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use crate::contract::model::NewProduct;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "productos")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "id_producto")]
    pub id: i64,
    #[sea_orm(column_name = "nombre")]
    pub name: String,
    #[sea_orm(column_name = "descripcion", column_type = "Text")]
    pub description: String,
    #[sea_orm(column_name = "imagen")]
    pub image: String,
    #[sea_orm(column_name = "id_categoria")]
    pub category_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::inventory::Entity")]
    Inventory,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewProduct> for ActiveModel {
    fn from(new: NewProduct) -> Self {
        Self {
            id: NotSet,
            name: Set(new.name),
            description: Set(new.description),
            image: Set(new.image),
            category_id: Set(new.category_id),
        }
    }
}
