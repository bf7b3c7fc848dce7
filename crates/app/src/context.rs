//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenSigner},
    database,
    domain::{
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to the database or applying migrations fails.
    pub async fn from_database_url(
        url: &str,
        signer: TokenSigner,
        run_migrations: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Ok(Self::from_pool(pool, signer))
    }

    /// Build application context around an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool, signer: TokenSigner) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(pool.clone())),
            products: Arc::new(PgProductsService::new(pool.clone())),
            auth: Arc::new(PgAuthService::new(pool, signer)),
        }
    }
}
