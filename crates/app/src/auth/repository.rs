//! Auth repository.

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::users::records::{UserId, UserRecord};

const FIND_CREDENTIALS_BY_USERNAME_SQL: &str =
    include_str!("sql/find_credentials_by_username.sql");
const FIND_ACTIVE_USER_SQL: &str = include_str!("sql/find_active_user.sql");

/// A user row together with its password hash.
#[derive(Debug, Clone)]
pub(crate) struct StoredCredentials {
    pub(crate) user: UserRecord,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, sqlx::Error> {
        query_as::<Postgres, StoredCredentials>(FIND_CREDENTIALS_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_active_user(
        &self,
        user: UserId,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_ACTIVE_USER_SQL)
            .bind(user.into_i64())
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StoredCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: UserRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
