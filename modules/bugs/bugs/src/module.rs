use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use bugs_sdk::BugsClientV1;

use crate::api::rest::routes;
use crate::config::BugsConfig;
use crate::domain::repo::BugsRepository;
use crate::domain::service::Service;
use crate::infra::storage::OrmBugsRepository;
use crate::infra::storage::migrations::Migrator;
use crate::local_client::BugsLocalClient;

/// Composition root of the bugs module: owns the service and hands out the
/// REST router and the in-process client.
#[derive(Clone)]
pub struct BugsModule {
    service: Arc<Service>,
    config: BugsConfig,
}

impl BugsModule {
    /// Bring the `bugs` schema up to date.
    ///
    /// # Errors
    /// Fails if any migration fails.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running bugs database migrations");
        Migrator::up(db, None).await?;
        info!("Bugs database migrations completed successfully");
        Ok(())
    }

    /// Wire the module over a `SeaORM` connection. The schema must already
    /// be migrated.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: BugsConfig) -> Self {
        Self::with_repository(Arc::new(OrmBugsRepository::new(db)), config)
    }

    #[must_use]
    pub fn with_repository(repo: Arc<dyn BugsRepository>, config: BugsConfig) -> Self {
        debug!(
            expose_error_stack = config.expose_error_stack,
            enable_docs = config.enable_docs,
            "Initializing bugs module"
        );
        Self {
            service: Arc::new(Service::new(repo)),
            config,
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// In-process client for consumers that live in the same binary.
    #[must_use]
    pub fn client(&self) -> Arc<dyn BugsClientV1> {
        Arc::new(BugsLocalClient::new(self.service()))
    }

    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.service(), &self.config)
    }
}
