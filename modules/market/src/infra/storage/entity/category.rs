use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use crate::contract::model::NewCategory;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categorias")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "id_categoria")]
    pub id: i64,
    #[sea_orm(column_name = "nombre_categoria")]
    pub name: String,
    #[sea_orm(column_name = "descripcion", column_type = "Text")]
    pub description: String,
    #[sea_orm(column_name = "estado")]
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Registration: identity left to the store, active forced on.
impl From<NewCategory> for ActiveModel {
    fn from(new: NewCategory) -> Self {
        Self {
            id: NotSet,
            name: Set(new.name),
            description: Set(new.description),
            active: Set(true),
        }
    }
}
