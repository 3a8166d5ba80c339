use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use crate::contract::model::NewUser;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "nombre")]
    pub first_name: String,
    #[sea_orm(column_name = "apellidos")]
    pub last_name: String,
    pub email: String,
    pub dni: String,
    #[sea_orm(column_name = "telefono")]
    pub phone: String,
    #[sea_orm(column_name = "imagen")]
    pub image: String,
    #[sea_orm(column_name = "id_rol")]
    pub role_id: i64,
    #[sea_orm(column_name = "estado")]
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewUser> for ActiveModel {
    fn from(new: NewUser) -> Self {
        Self {
            id: NotSet,
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(new.email),
            dni: Set(new.dni),
            phone: Set(new.phone),
            image: Set(new.image),
            role_id: Set(new.role_id),
            active: Set(true),
        }
    }
}
