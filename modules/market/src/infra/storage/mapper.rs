//! Row → contract model assembly.
//!
//! Flat rows convert with `From`; rows that reference other records take the already
//! resolved related model as an argument.

use sea_orm::Set;

use crate::contract::model::{
    Category, Inventory, Order, PaymentMethod, Product, Role, SalesReceipt, User,
};
use crate::infra::storage::entity::{
    category, inventory, order, payment_method, product, role, sales_receipt, user,
};

impl From<category::Model> for Category {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            active: m.active,
        }
    }
}

impl From<role::Model> for Role {
    fn from(m: role::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            active: m.active,
        }
    }
}

impl From<payment_method::Model> for PaymentMethod {
    fn from(m: payment_method::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            active: m.active,
        }
    }
}

pub fn user_to_contract(m: user::Model, role: Role) -> User {
    User {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        dni: m.dni,
        phone: m.phone,
        image: m.image,
        role,
        active: m.active,
    }
}

pub fn product_to_contract(m: product::Model, category: Category) -> Product {
    Product {
        id: m.id,
        name: m.name,
        description: m.description,
        image: m.image,
        category,
    }
}

pub fn inventory_to_contract(m: inventory::Model, product: Product) -> Inventory {
    Inventory {
        id: m.id,
        product,
        stock: m.stock,
    }
}

pub fn order_to_contract(m: order::Model, user: User) -> Order {
    Order {
        id: m.id,
        user,
        placed_at: m.placed_at,
        total: m.total,
        active: m.active,
    }
}

/// `order` is `None` exactly when the row has no order reference.
pub fn receipt_to_contract(m: sales_receipt::Model, order: Option<Order>) -> SalesReceipt {
    SalesReceipt {
        id: m.id,
        order,
        issued_at: m.issued_at,
        total: m.total,
    }
}

// Write-back of mutable columns. The id is always set so `update` targets the row by key.

pub fn category_to_active(c: &Category) -> category::ActiveModel {
    category::ActiveModel {
        id: Set(c.id),
        name: Set(c.name.clone()),
        description: Set(c.description.clone()),
        active: Set(c.active),
    }
}

pub fn role_to_active(r: &Role) -> role::ActiveModel {
    role::ActiveModel {
        id: Set(r.id),
        name: Set(r.name.clone()),
        active: Set(r.active),
    }
}

pub fn payment_method_to_active(m: &PaymentMethod) -> payment_method::ActiveModel {
    payment_method::ActiveModel {
        id: Set(m.id),
        name: Set(m.name.clone()),
        active: Set(m.active),
    }
}

pub fn user_to_active(u: &User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id),
        first_name: Set(u.first_name.clone()),
        last_name: Set(u.last_name.clone()),
        email: Set(u.email.clone()),
        dni: Set(u.dni.clone()),
        phone: Set(u.phone.clone()),
        image: Set(u.image.clone()),
        role_id: Set(u.role.id),
        active: Set(u.active),
    }
}

pub fn product_to_active(p: &Product) -> product::ActiveModel {
    product::ActiveModel {
        id: Set(p.id),
        name: Set(p.name.clone()),
        description: Set(p.description.clone()),
        image: Set(p.image.clone()),
        category_id: Set(p.category.id),
    }
}
