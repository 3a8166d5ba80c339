use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::config::MarketConfig;
use crate::contract::client::MarketApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::MarketLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmMarketRepository;

/// The wired market module: domain service plus the in-process client on top of it.
#[derive(Clone)]
pub struct Market {
    service: Arc<Service>,
    client: Arc<dyn MarketApi>,
}

impl Market {
    /// Apply the schema migrations on `conn`.
    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running market database migrations");
        Migrator::up(conn, None).await?;
        info!("Market database migrations completed successfully");
        Ok(())
    }

    /// Wire repository (infra) to domain service (port) and the local client.
    pub fn init(conn: DatabaseConnection, cfg: &MarketConfig) -> Self {
        info!("Initializing market module");
        debug!(
            "Loaded market config: default_page_size={}, max_page_size={}",
            cfg.default_page_size, cfg.max_page_size
        );

        let repo = SeaOrmMarketRepository::new(conn);
        let service_config = ServiceConfig {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
        };
        let service = Arc::new(Service::new(Arc::new(repo), service_config));
        let client: Arc<dyn MarketApi> = Arc::new(MarketLocalClient::new(service.clone()));
        Self { service, client }
    }

    /// Migrate, then wire.
    pub async fn start(conn: DatabaseConnection, cfg: &MarketConfig) -> anyhow::Result<Self> {
        Self::migrate(&conn).await?;
        Ok(Self::init(conn, cfg))
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn client(&self) -> Arc<dyn MarketApi> {
        self.client.clone()
    }
}
