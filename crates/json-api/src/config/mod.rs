//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Northwind JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "northwind-json", about = "Northwind catalogue JSON API", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request diagnostics settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Catalogue database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from `.env`, the environment and CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env file is fine.
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
