//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::users::{
    data::{NewUser, ProfileUpdate},
    records::{UserId, UserRecord},
};

#[cfg(test)]
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub(crate) async fn find_user(
        &self,
        user: UserId,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_i64())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        user: NewUser,
        password_hash: String,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.username)
            .bind(password_hash)
            .bind(user.email)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(user.is_staff)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        user: UserId,
        update: ProfileUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_PROFILE_SQL)
            .bind(user.into_i64())
            .bind(update.email)
            .bind(update.first_name)
            .bind(update.last_name)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn delete_user(&self, user: UserId) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: UserId::from_i64(row.try_get("id")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            is_staff: row.try_get("is_staff")?,
            is_active: row.try_get("is_active")?,
            date_joined: row.try_get::<SqlxTimestamp, _>("date_joined")?.to_jiff(),
        })
    }
}
