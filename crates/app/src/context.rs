//! App Context

use std::{sync::Arc, time::Duration};

use aura::{CheckoutFees, SimulatedGateway};
use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        customers::{CustomersService, PgCustomersService},
        orders::{OrdersService, PgOrdersService},
        payments::{PaymentsService, PgPaymentsService},
        products::{PgProductsService, ProductsService},
    },
    events::{EventPublisher, TracingEventPublisher},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),
}

/// Runtime knobs shared by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    pub fees: CheckoutFees,
    pub payments_test_mode: bool,
    pub catalog_cache_ttl: Duration,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
    pub customers: Arc<dyn CustomersService>,
}

impl AppContext {
    /// Build application context from a database URL, optionally applying
    /// pending migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(
        url: &str,
        settings: AppSettings,
        run_migrations: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_db(
            Db::new(pool),
            settings,
            Arc::new(TracingEventPublisher),
        ))
    }

    /// Wire every service against one database handle and event sink.
    #[must_use]
    pub fn from_db(db: Db, settings: AppSettings, events: Arc<dyn EventPublisher>) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(
                db.clone(),
                settings.catalog_cache_ttl,
            )),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(
                db.clone(),
                settings.fees,
                Arc::clone(&events),
            )),
            payments: Arc::new(PgPaymentsService::new(
                db.clone(),
                SimulatedGateway::new(settings.payments_test_mode),
                events,
            )),
            customers: Arc::new(PgCustomersService::new(db)),
        }
    }
}
