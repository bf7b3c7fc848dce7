//! Test context for service-level integration tests.

use crate::{
    auth::{PgAuthService, TokenLifetimes, TokenSigner},
    domain::{products::PgProductsService, users::PgUsersService},
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub users: PgUsersService,
    pub products: PgProductsService,
    pub auth: PgAuthService,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = TestDb::new().await;
        let pool = db.pool().clone();

        Self {
            users: PgUsersService::new(pool.clone()),
            products: PgProductsService::new(pool.clone()),
            auth: PgAuthService::new(
                pool,
                TokenSigner::new("test-signing-secret", TokenLifetimes::default()),
            ),
            db,
        }
    }
}
