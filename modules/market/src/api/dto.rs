//! Read projections and request payloads, in the storefront's JSON vocabulary.
//!
//! Projections are built from borrowed entities (`From<&Entity>`), so building one can
//! never mutate its source and never touches the store: every related record must already
//! be resolved on the entity.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::contract::model::{
    Category, CategoryPatch, Inventory, NewCategory, NewInventory, NewPaymentMethod,
    NewProduct, NewRole, NewUser, Order, PaymentMethod, PaymentMethodPatch, Product,
    ProductPatch, Role, RolePatch, SalesReceipt, User, UserPatch,
};

// ---------- projections ----------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    #[serde(rename = "idCategoria")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "estado")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    pub id: i64,
    #[serde(rename = "nombreRol")]
    pub name: String,
    #[serde(rename = "estado")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethodDto {
    #[serde(rename = "idMetodoPago")]
    pub id: i64,
    #[serde(rename = "nombreMetodo")]
    pub name: String,
    #[serde(rename = "estado")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellidos")]
    pub last_name: String,
    pub email: String,
    pub dni: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "imagen")]
    pub image: String,
    #[serde(rename = "rol")]
    pub role: RoleDto,
    #[serde(rename = "estado")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    #[serde(rename = "idProducto")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "imagen")]
    pub image: String,
    #[serde(rename = "categoria")]
    pub category: CategoryDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryDto {
    #[serde(rename = "idInventario")]
    pub id: i64,
    #[serde(rename = "producto")]
    pub product: ProductDto,
    pub stock: i32,
}

/// Order view. The id is widened to 64 bits and the placement date stays a structured
/// timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    #[serde(rename = "idPedido")]
    pub id: i64,
    #[serde(rename = "usuario")]
    pub user: UserDto,
    #[serde(rename = "fechaPedido")]
    pub placed_at: NaiveDateTime,
    pub total: f64,
    #[serde(rename = "estado")]
    pub active: bool,
}

/// Receipt view. Unlike `OrderDto`, the emission date is rendered as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalesReceiptDto {
    #[serde(rename = "idComprobante")]
    pub id: i64,
    #[serde(rename = "Pedido")]
    pub order: Option<OrderDto>,
    #[serde(rename = "fechaEmision")]
    pub issued_at: String,
    pub total: f64,
}

impl From<&Category> for CategoryDto {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            active: c.active,
        }
    }
}

impl From<&Role> for RoleDto {
    fn from(r: &Role) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            active: r.active,
        }
    }
}

impl From<&PaymentMethod> for PaymentMethodDto {
    fn from(m: &PaymentMethod) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            active: m.active,
        }
    }
}

impl From<&User> for UserDto {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            email: u.email.clone(),
            dni: u.dni.clone(),
            phone: u.phone.clone(),
            image: u.image.clone(),
            role: RoleDto::from(&u.role),
            active: u.active,
        }
    }
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone(),
            image: p.image.clone(),
            category: CategoryDto::from(&p.category),
        }
    }
}

impl From<&Inventory> for InventoryDto {
    fn from(i: &Inventory) -> Self {
        Self {
            id: i.id,
            product: ProductDto::from(&i.product),
            stock: i.stock,
        }
    }
}

impl From<&Order> for OrderDto {
    fn from(o: &Order) -> Self {
        Self {
            id: i64::from(o.id),
            user: UserDto::from(&o.user),
            placed_at: o.placed_at,
            total: o.total,
            active: o.active,
        }
    }
}

impl From<&SalesReceipt> for SalesReceiptDto {
    fn from(r: &SalesReceipt) -> Self {
        Self {
            id: r.id,
            order: r.order.as_ref().map(OrderDto::from),
            issued_at: r.issued_at.to_string(),
            total: r.total,
        }
    }
}

// ---------- request payloads ----------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryReq {
    pub nombre: String,
    pub descripcion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateCategoryReq {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleReq {
    pub nombre_rol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleReq {
    pub nombre_rol: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentMethodReq {
    pub nombre_metodo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentMethodReq {
    pub nombre_metodo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserReq {
    pub nombre: String,
    pub apellidos: String,
    pub email: String,
    pub dni: String,
    pub telefono: String,
    #[serde(default = "default_user_image")]
    pub imagen: String,
    pub rol_id: i64,
}

fn default_user_image() -> String {
    "default.png".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateUserReq {
    pub nombre: Option<String>,
    pub apellidos: Option<String>,
    pub email: Option<String>,
    pub dni: Option<String>,
    pub telefono: Option<String>,
    pub imagen: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeUserRoleReq {
    pub id_usuario: i64,
    pub id_rol: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductReq {
    pub nombre: String,
    pub descripcion: String,
    #[serde(default)]
    pub imagen: String,
    pub id_categoria: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductReq {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub imagen: Option<String>,
    pub id_categoria: Option<i64>,
}

impl UpdateProductReq {
    /// Split into the field change-set and the (still unresolved) category id.
    pub fn into_parts(self) -> (ProductPatch, Option<i64>) {
        let patch = ProductPatch {
            name: self.nombre,
            description: self.descripcion,
            image: self.imagen,
            category: None,
        };
        (patch, self.id_categoria)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryReq {
    pub id_producto: i64,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderReq {
    pub id_usuario: i64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueReceiptReq {
    pub id_pedido: Option<i32>,
    pub total: f64,
}

impl From<CreateCategoryReq> for NewCategory {
    fn from(req: CreateCategoryReq) -> Self {
        Self {
            name: req.nombre,
            description: req.descripcion,
        }
    }
}

impl From<UpdateCategoryReq> for CategoryPatch {
    fn from(req: UpdateCategoryReq) -> Self {
        Self {
            name: req.nombre,
            description: req.descripcion,
        }
    }
}

impl From<CreateRoleReq> for NewRole {
    fn from(req: CreateRoleReq) -> Self {
        Self {
            name: req.nombre_rol,
        }
    }
}

impl From<UpdateRoleReq> for RolePatch {
    fn from(req: UpdateRoleReq) -> Self {
        Self {
            name: req.nombre_rol,
        }
    }
}

impl From<CreatePaymentMethodReq> for NewPaymentMethod {
    fn from(req: CreatePaymentMethodReq) -> Self {
        Self {
            name: req.nombre_metodo,
        }
    }
}

impl From<UpdatePaymentMethodReq> for PaymentMethodPatch {
    fn from(req: UpdatePaymentMethodReq) -> Self {
        Self {
            name: req.nombre_metodo,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            first_name: req.nombre,
            last_name: req.apellidos,
            email: req.email,
            dni: req.dni,
            phone: req.telefono,
            image: req.imagen,
            role_id: req.rol_id,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            first_name: req.nombre,
            last_name: req.apellidos,
            email: req.email,
            dni: req.dni,
            phone: req.telefono,
            image: req.imagen,
        }
    }
}

impl From<CreateProductReq> for NewProduct {
    fn from(req: CreateProductReq) -> Self {
        Self {
            name: req.nombre,
            description: req.descripcion,
            image: req.imagen,
            category_id: req.id_categoria,
        }
    }
}

impl From<CreateInventoryReq> for NewInventory {
    fn from(req: CreateInventoryReq) -> Self {
        Self {
            product_id: req.id_producto,
            stock: req.stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn placed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn role() -> Role {
        Role {
            id: 2,
            name: "VENDEDOR".to_string(),
            active: true,
        }
    }

    fn user() -> User {
        User {
            id: 11,
            first_name: "Luis".to_string(),
            last_name: "Rojas".to_string(),
            email: "luis@market.pe".to_string(),
            dni: "44556677".to_string(),
            phone: "912345678".to_string(),
            image: "luis.png".to_string(),
            role: role(),
            active: true,
        }
    }

    fn order() -> Order {
        Order {
            id: 42,
            user: user(),
            placed_at: placed_at(),
            total: 25.5,
            active: true,
        }
    }

    #[test]
    fn category_projection_is_a_faithful_snapshot() {
        let c = Category {
            id: 5,
            name: "Lácteos".to_string(),
            description: "Leche y derivados".to_string(),
            active: false,
        };
        let before = c.clone();

        let dto = CategoryDto::from(&c);

        assert_eq!(c, before);
        assert_eq!(dto.id, c.id);
        assert_eq!(dto.name, c.name);
        assert_eq!(dto.description, c.description);
        assert_eq!(dto.active, c.active);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["idCategoria"], 5);
        assert_eq!(json["nombre"], "Lácteos");
        assert_eq!(json["descripcion"], "Leche y derivados");
        assert_eq!(json["estado"], false);
    }

    #[test]
    fn order_projection_widens_id_and_resolves_user() {
        let o = order();
        let dto = OrderDto::from(&o);

        assert_eq!(dto.id, 42_i64);
        assert_eq!(dto.user, UserDto::from(&user()));
        assert_eq!(dto.user.role.name, "VENDEDOR");
        assert_eq!(dto.placed_at, placed_at());
        assert_eq!(dto.total, 25.5);
        assert!(dto.active);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["idPedido"], 42);
        assert_eq!(json["usuario"]["rol"]["nombreRol"], "VENDEDOR");
        assert_eq!(json["fechaPedido"], "2024-11-05T14:30:00");
    }

    #[test]
    fn receipt_projection_renders_emission_date_as_text() {
        let r = SalesReceipt {
            id: 900,
            order: Some(order()),
            issued_at: placed_at(),
            total: 25.5,
        };

        let dto = SalesReceiptDto::from(&r);

        assert_eq!(dto.issued_at, "2024-11-05 14:30:00");
        assert_eq!(dto.order.as_ref().map(|o| o.id), Some(42));
        assert_eq!(dto.total, 25.5);
    }

    #[test]
    fn receipt_without_order_projects_null_order() {
        let r = SalesReceipt {
            id: 901,
            order: None,
            issued_at: placed_at(),
            total: 10.0,
        };

        let dto = SalesReceiptDto::from(&r);
        assert!(dto.order.is_none());

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json.get("Pedido"), Some(&serde_json::Value::Null));
        assert!(json.get("pedido").is_none());
        assert_eq!(json["idComprobante"], 901);
    }

    #[test]
    fn inventory_projection_nests_product_and_category() {
        let inv = Inventory {
            id: 3,
            product: Product {
                id: 8,
                name: "Arroz Costeño 1kg".to_string(),
                description: "Arroz extra".to_string(),
                image: "arroz.png".to_string(),
                category: Category {
                    id: 1,
                    name: "Abarrotes".to_string(),
                    description: String::new(),
                    active: true,
                },
            },
            stock: 120,
        };

        let json = serde_json::to_value(InventoryDto::from(&inv)).unwrap();

        assert_eq!(json["idInventario"], 3);
        assert_eq!(json["stock"], 120);
        assert_eq!(json["producto"]["idProducto"], 8);
        assert_eq!(json["producto"]["categoria"]["nombre"], "Abarrotes");
    }

    #[test]
    fn update_request_null_and_missing_fields_are_none() {
        let req: UpdateCategoryReq =
            serde_json::from_str(r#"{"nombre": null, "descripcion": ""}"#).unwrap();
        let patch = CategoryPatch::from(req);
        assert_eq!(patch.name, None);
        assert_eq!(patch.description, Some(String::new()));

        let req: UpdateCategoryReq = serde_json::from_str("{}").unwrap();
        assert_eq!(CategoryPatch::from(req), CategoryPatch::default());
    }

    #[test]
    fn create_user_request_defaults_image() {
        let req: CreateUserReq = serde_json::from_str(
            r#"{"nombre":"Rosa","apellidos":"Diaz","email":"rosa@market.pe","dni":"1","telefono":"2","rolId":3}"#,
        )
        .unwrap();
        let new_user = NewUser::from(req);
        assert_eq!(new_user.image, "default.png");
        assert_eq!(new_user.role_id, 3);
    }

    #[test]
    fn update_product_request_splits_category() {
        let req: UpdateProductReq =
            serde_json::from_str(r#"{"imagen":"nueva.png","idCategoria":4}"#).unwrap();
        let (patch, category_id) = req.into_parts();
        assert_eq!(patch.image.as_deref(), Some("nueva.png"));
        assert_eq!(patch.name, None);
        assert_eq!(patch.category, None);
        assert_eq!(category_id, Some(4));
    }
}
