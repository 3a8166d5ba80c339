#![allow(dead_code)]

use market::config::MarketConfig;
use market::contract::model::{
    Category, Inventory, NewCategory, NewInventory, NewProduct, NewRole, NewUser, Product, Role,
    User,
};
use market::domain::service::Service;
use market::Market;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory SQLite database with the market schema applied.
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn memory_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(opts)
        .await
        .expect("connect to in-memory sqlite");
    Market::migrate(&conn).await.expect("apply migrations");
    conn
}

pub async fn market_with(cfg: MarketConfig) -> Market {
    Market::init(memory_db().await, &cfg)
}

pub async fn market() -> Market {
    market_with(MarketConfig::default()).await
}

pub fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: format!("{name} description"),
    }
}

pub fn new_product(name: &str, category_id: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: String::new(),
        image: format!("{}.png", name.to_lowercase().replace(' ', "_")),
        category_id,
    }
}

pub fn new_user(email: &str, role_id: i64) -> NewUser {
    NewUser {
        first_name: "Carla".to_string(),
        last_name: "Mendoza".to_string(),
        email: email.to_string(),
        dni: "47001122".to_string(),
        phone: "987654321".to_string(),
        image: "default.png".to_string(),
        role_id,
    }
}

/// Two categories (dairy, bakery) with three stocked products:
/// "Leche Gloria" and "Yogurt Gloria" in dairy, "Pan de molde" in bakery.
pub struct Shelf {
    pub dairy: Category,
    pub bakery: Category,
    pub products: Vec<Product>,
    pub stock: Vec<Inventory>,
}

pub async fn stock_shelf(service: &Service) -> Shelf {
    let dairy = service
        .create_category(new_category("Lácteos"))
        .await
        .unwrap();
    let bakery = service
        .create_category(new_category("Panadería"))
        .await
        .unwrap();

    let mut products = Vec::new();
    let mut stock = Vec::new();
    for (name, category_id, qty) in [
        ("Leche Gloria", dairy.id, 24),
        ("Yogurt Gloria", dairy.id, 12),
        ("Pan de molde", bakery.id, 8),
    ] {
        let p = service
            .create_product(new_product(name, category_id))
            .await
            .unwrap();
        let i = service
            .add_inventory(NewInventory {
                product_id: p.id,
                stock: qty,
            })
            .await
            .unwrap();
        products.push(p);
        stock.push(i);
    }

    Shelf {
        dairy,
        bakery,
        products,
        stock,
    }
}

pub async fn seller(service: &Service) -> (Role, User) {
    let role = service
        .create_role(NewRole {
            name: "VENDEDOR".to_string(),
        })
        .await
        .unwrap();
    let user = service
        .create_user(new_user("carla@market.pe", role.id))
        .await
        .unwrap();
    (role, user)
}

pub fn ids(items: &[Inventory]) -> Vec<i64> {
    let mut ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    ids.sort_unstable();
    ids
}
