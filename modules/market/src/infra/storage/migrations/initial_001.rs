//! Initial market schema. Surrogate identity columns, `estado` flags default to true.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Categorias {
    Table,
    IdCategoria,
    NombreCategoria,
    Descripcion,
    Estado,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    NombreRol,
    Estado,
}

#[derive(DeriveIden)]
enum MetodosPago {
    Table,
    IdMetodoPago,
    NombreMetodo,
    Estado,
}

#[derive(DeriveIden)]
enum Usuarios {
    Table,
    Id,
    Nombre,
    Apellidos,
    Email,
    Dni,
    Telefono,
    Imagen,
    IdRol,
    Estado,
}

#[derive(DeriveIden)]
enum Productos {
    Table,
    IdProducto,
    Nombre,
    Descripcion,
    Imagen,
    IdCategoria,
}

#[derive(DeriveIden)]
enum Inventario {
    Table,
    IdInventario,
    IdProducto,
    Stock,
}

#[derive(DeriveIden)]
enum Pedidos {
    Table,
    IdPedido,
    IdUsuario,
    FechaPedido,
    Total,
    Estado,
}

#[derive(DeriveIden)]
enum ComprobantesVenta {
    Table,
    IdComprobante,
    IdPedido,
    FechaEmision,
    Total,
}

fn active_flag<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .boolean()
        .not_null()
        .default(true)
        .to_owned()
}

fn identity<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categorias::Table)
                    .if_not_exists()
                    .col(identity(Categorias::IdCategoria))
                    .col(ColumnDef::new(Categorias::NombreCategoria).string().not_null())
                    .col(ColumnDef::new(Categorias::Descripcion).text().not_null())
                    .col(active_flag(Categorias::Estado))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(identity(Roles::Id))
                    .col(ColumnDef::new(Roles::NombreRol).string().not_null())
                    .col(active_flag(Roles::Estado))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MetodosPago::Table)
                    .if_not_exists()
                    .col(identity(MetodosPago::IdMetodoPago))
                    .col(ColumnDef::new(MetodosPago::NombreMetodo).string().not_null())
                    .col(active_flag(MetodosPago::Estado))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(identity(Usuarios::Id))
                    .col(ColumnDef::new(Usuarios::Nombre).string().not_null())
                    .col(ColumnDef::new(Usuarios::Apellidos).string().not_null())
                    .col(ColumnDef::new(Usuarios::Email).string().not_null())
                    .col(ColumnDef::new(Usuarios::Dni).string().not_null())
                    .col(ColumnDef::new(Usuarios::Telefono).string().not_null())
                    .col(ColumnDef::new(Usuarios::Imagen).string().not_null())
                    .col(ColumnDef::new(Usuarios::IdRol).big_integer().not_null())
                    .col(active_flag(Usuarios::Estado))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_usuarios_rol")
                            .from(Usuarios::Table, Usuarios::IdRol)
                            .to(Roles::Table, Roles::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Productos::Table)
                    .if_not_exists()
                    .col(identity(Productos::IdProducto))
                    .col(ColumnDef::new(Productos::Nombre).string().not_null())
                    .col(ColumnDef::new(Productos::Descripcion).text().not_null())
                    .col(ColumnDef::new(Productos::Imagen).string().not_null())
                    .col(ColumnDef::new(Productos::IdCategoria).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_productos_categoria")
                            .from(Productos::Table, Productos::IdCategoria)
                            .to(Categorias::Table, Categorias::IdCategoria),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Inventario::Table)
                    .if_not_exists()
                    .col(identity(Inventario::IdInventario))
                    .col(ColumnDef::new(Inventario::IdProducto).big_integer().not_null())
                    .col(ColumnDef::new(Inventario::Stock).integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventario_producto")
                            .from(Inventario::Table, Inventario::IdProducto)
                            .to(Productos::Table, Productos::IdProducto),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pedidos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pedidos::IdPedido)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pedidos::IdUsuario).big_integer().not_null())
                    .col(ColumnDef::new(Pedidos::FechaPedido).timestamp().not_null())
                    .col(ColumnDef::new(Pedidos::Total).double().not_null())
                    .col(active_flag(Pedidos::Estado))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pedidos_usuario")
                            .from(Pedidos::Table, Pedidos::IdUsuario)
                            .to(Usuarios::Table, Usuarios::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ComprobantesVenta::Table)
                    .if_not_exists()
                    .col(identity(ComprobantesVenta::IdComprobante))
                    .col(ColumnDef::new(ComprobantesVenta::IdPedido).integer().null())
                    .col(
                        ColumnDef::new(ComprobantesVenta::FechaEmision)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ComprobantesVenta::Total).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comprobantes_pedido")
                            .from(ComprobantesVenta::Table, ComprobantesVenta::IdPedido)
                            .to(Pedidos::Table, Pedidos::IdPedido),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComprobantesVenta::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pedidos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inventario::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Productos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MetodosPago::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categorias::Table).to_owned())
            .await?;
        Ok(())
    }
}
