//! Aura JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    catch_panic::CatchPanic,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use aura_app::context::{AppContext, AppSettings};

use crate::{
    config::ServerConfig,
    observability::{Observability, RequestLogging, metrics_handler},
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod carts;
mod config;
mod customers;
mod extensions;
mod healthcheck;
mod identity;
mod money;
mod observability;
mod orders;
mod payments;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Aura JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let conversion = match config.checkout.conversion() {
        Ok(conversion) => conversion,
        Err(conversion_error) => {
            error!("invalid exchange rate: {conversion_error}");

            process::exit(1);
        }
    };

    let fees = match config.checkout.fees(&conversion) {
        Ok(fees) => fees,
        Err(fees_error) => {
            error!("invalid checkout fees: {fees_error}");

            process::exit(1);
        }
    };

    info!(
        shipping_fee = fees.shipping,
        cod_surcharge = fees.cod_surcharge,
        payments_test_mode = config.checkout.payments_test_mode,
        exchange_rate = %conversion.rate(),
        "checkout configured"
    );

    let settings = AppSettings {
        fees,
        payments_test_mode: config.checkout.payments_test_mode,
        catalog_cache_ttl: config.catalog.cache_ttl(),
    };

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        settings,
        config.database.migrate,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(RequestLogging::new(&config.observability))
        .hoop(inject(State::shared(app, conversion)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(router::app_router());

    let doc = OpenApi::new("Aura API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;

    observability.shutdown();
}
