//! App Context

use std::sync::Arc;

use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    domain::{
        categories::{CategoriesService, PgCategoriesService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

/// Services shared by every request.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
}

impl AppContext {
    /// Connect, migrate and build the application context.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        info!(max_connections, "database ready");

        Ok(Self::from_pool(pool))
    }

    /// Build the context over an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        let db = Db::new(pool);

        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db)),
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
