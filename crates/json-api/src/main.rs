//! Recipe Management JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use recipes_app::{
    bootstrap,
    context::AppContext,
    events::{AddToBook, ConsumerHost},
};

use crate::{
    config::ServerConfig,
    observability::{Observability, metrics_handler, request_logging},
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod authors;
mod config;
mod errors;
mod events;
mod extensions;
mod fields;
mod healthcheck;
mod ingredients;
mod observability;
mod pagination;
mod recipes;
mod role_permissions;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod users;

/// Recipe Management JSON API Server entry point
#[tokio::main]
pub async fn main() {
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

    let pool = match bootstrap::connect(&config.database.database_url).await {
        Ok(pool) => pool,
        Err(init_error) => {
            error!("failed to connect to database: {init_error}");

            process::exit(1);
        }
    };

    if config.database.database_migrate
        && let Err(migrate_error) = bootstrap::migrate(&pool).await
    {
        error!("failed to migrate database: {migrate_error}");

        process::exit(1);
    }

    if config.database.database_seed {
        match bootstrap::seed(&pool).await {
            Ok(inserted) => info!(inserted, "seeded role permissions"),
            Err(seed_error) => {
                error!("failed to seed database: {seed_error}");

                process::exit(1);
            }
        }
    }

    let app = match AppContext::from_pool(pool, &config.bus.settings()).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let consumers = match ConsumerHost::new(app.bus.clone())
        .register(Arc::new(AddToBook::default()))
        .start()
        .await
    {
        Ok(consumers) => consumers,
        Err(bus_error) => {
            error!("failed to start consumer host: {bus_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(router::app_router());

    let doc = OpenApi::new("Recipe Management API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let addr = config.socket_addr();
    let grace = config.server.grace_period();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, Some(consumers), grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    observability.shutdown();
}
