//! Users service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    auth::hash_password,
    domain::users::{
        data::{NewUser, ProfileUpdate},
        errors::UsersServiceError,
        permissions::can_delete,
        records::{UserId, UserRecord},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let password_hash = hash_password(user.password.clone()).await?;

        self.repository
            .create_user(user, password_hash)
            .await
            .map_err(Into::into)
    }

    async fn update_profile(
        &self,
        user: UserId,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        update.validate()?;

        self.repository
            .update_profile(user, update)
            .await
            .map_err(Into::into)
    }

    async fn delete_user(
        &self,
        caller: &UserRecord,
        target: UserId,
    ) -> Result<(), UsersServiceError> {
        if !can_delete(caller, target) {
            return Err(UsersServiceError::Forbidden);
        }

        let rows_affected = self.repository.delete_user(target).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
/// User identity operations.
pub trait UsersService: Send + Sync {
    /// Creates a user, hashing the supplied password.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Validates and applies a partial profile update, returning the updated record.
    async fn update_profile(
        &self,
        user: UserId,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Deletes `target` on behalf of `caller`, enforcing the staff-or-self rule.
    async fn delete_user(
        &self,
        caller: &UserRecord,
        target: UserId,
    ) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::create_user};

    use super::*;

    #[tokio::test]
    async fn create_user_returns_active_non_staff_record() -> TestResult {
        let ctx = TestContext::new().await;

        let user = create_user(&ctx, "alice", false).await?;

        assert_eq!(user.username, "alice");
        assert!(user.is_active);
        assert!(!user.is_staff);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_username_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "alice", false).await?;

        let result = create_user(&ctx, "alice", true).await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_is_persisted() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice", false).await?;

        ctx.users
            .update_profile(
                user.id,
                ProfileUpdate {
                    email: Some("test@mail.com".to_string()),
                    first_name: Some("John".to_string()),
                    last_name: Some("Doe".to_string()),
                },
            )
            .await?;

        let fetched = ctx
            .users
            .repository
            .find_user(user.id)
            .await?
            .ok_or("updated user is missing")?;

        assert_eq!(fetched.email, "test@mail.com");
        assert_eq!(fetched.first_name, "John");
        assert_eq!(fetched.last_name, "Doe");
        assert_eq!(fetched.username, "alice");

        Ok(())
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_alone() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice", false).await?;

        ctx.users
            .update_profile(
                user.id,
                ProfileUpdate {
                    first_name: Some("John".to_string()),
                    last_name: Some("Doe".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await?;

        let updated = ctx
            .users
            .update_profile(
                user.id,
                ProfileUpdate {
                    last_name: Some("Smith".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.first_name, "John");
        assert_eq!(updated.last_name, "Smith");

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_rejects_invalid_email() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice", false).await?;

        let result = ctx
            .users
            .update_profile(
                user.id,
                ProfileUpdate {
                    email: Some("nope".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::Validation(ref errors)) if errors.get("email").is_some()),
            "expected email validation error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn users_can_delete_themselves() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "alice", false).await?;

        ctx.users.delete_user(&user, user.id).await?;

        assert_eq!(ctx.users.repository.find_user(user.id).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn non_staff_cannot_delete_other_users() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = create_user(&ctx, "alice", false).await?;
        let bob = create_user(&ctx, "bob", false).await?;

        let result = ctx.users.delete_user(&alice, bob.id).await;

        assert!(
            matches!(result, Err(UsersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        assert!(ctx.users.repository.find_user(bob.id).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn staff_can_delete_other_users() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user(&ctx, "admin", true).await?;
        let bob = create_user(&ctx, "bob", false).await?;

        ctx.users.delete_user(&admin, bob.id).await?;

        assert_eq!(ctx.users.repository.find_user(bob.id).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn staff_deleting_unknown_user_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_user(&ctx, "admin", true).await?;

        let result = ctx
            .users
            .delete_user(&admin, UserId::from_i64(admin.id.into_i64() + 1_000))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
