//! Northwind JSON API Server

use std::process;

use salvo::{
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
};
use tracing::{error, info};

use northwind_app::context::AppContext;

use crate::config::ServerConfig;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod categories;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod pagination;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Northwind JSON API Server entry point
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

    if let Err(init_error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so tracing macros go nowhere"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    observability::apply_runtime_config(&config.observability);

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.database_max_connections,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = router::app_router(app);

    let doc = OpenApi::new("Northwind API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}
