use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use crate::contract::model::NewPaymentMethod;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "metodos_pago")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "id_metodo_pago")]
    pub id: i64,
    #[sea_orm(column_name = "nombre_metodo")]
    pub name: String,
    #[sea_orm(column_name = "estado")]
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewPaymentMethod> for ActiveModel {
    fn from(new: NewPaymentMethod) -> Self {
        Self {
            id: NotSet,
            name: Set(new.name),
            active: Set(true),
        }
    }
}
