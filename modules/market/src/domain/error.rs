use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn category_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Category",
            id,
        }
    }

    pub fn role_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Role",
            id,
        }
    }

    pub fn payment_method_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Payment method",
            id,
        }
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "User",
            id,
        }
    }

    pub fn product_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Product",
            id,
        }
    }

    pub fn inventory_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Inventory",
            id,
        }
    }

    pub fn order_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "Order",
            id: i64::from(id),
        }
    }

    pub fn receipt_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Sales receipt",
            id,
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(e: anyhow::Error) -> Self {
        Self::database(format!("{e:#}"))
    }
}
