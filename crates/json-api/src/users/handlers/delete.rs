//! Delete User Handler

use std::sync::Arc;

use salvo::prelude::*;

use shopfront_app::{domain::users::records::UserId, validation::FieldErrors};

use crate::{errors::ApiError, extensions::*, state::State, users::errors::into_api_error};

/// Delete User Handler
///
/// Staff may delete any user; everyone else may only delete themselves.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    parameters(("id" = i64, Path, description = "Id of the user to delete")),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "User deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller may not delete this user"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "users.delete",
    skip(req, depot),
    fields(caller_id = tracing::field::Empty, target_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let target = target_id(req)?;

    let span = tracing::Span::current();

    span.record("caller_id", tracing::field::display(caller.id));
    span.record("target_id", tracing::field::display(target));

    state
        .app
        .users
        .delete_user(caller, target)
        .await
        .map_err(into_api_error)?;

    tracing::info!(caller_id = %caller.id, target_id = %target, "deleted user");

    Ok(StatusCode::NO_CONTENT)
}

fn target_id(req: &Request) -> Result<UserId, ApiError> {
    req.param::<String>("id")
        .and_then(|id| id.parse::<i64>().ok())
        .map(UserId::from_i64)
        .ok_or_else(|| {
            ApiError::Validation(FieldErrors::single("id", "A valid integer is required."))
        })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use shopfront_app::domain::users::{MockUsersService, UsersServiceError, permissions::can_delete};

    use crate::{
        errors::{NOT_FOUND, PERMISSION_DENIED},
        test_helpers::{
            TEST_USER_ID, make_user, service_as, state_with, strict_auth_mock,
            strict_products_mock, users_service,
        },
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("users/{id}/delete").delete(handler)
    }

    /// Mock that applies the real permission rule and reports `existing` ids as present.
    fn permission_checking_mock(existing: &'static [i64]) -> MockUsersService {
        let mut users = MockUsersService::new();

        users.expect_delete_user().once().returning(move |caller, target| {
            if !can_delete(caller, target) {
                return Err(UsersServiceError::Forbidden);
            }

            if existing.contains(&target.into_i64()) {
                Ok(())
            } else {
                Err(UsersServiceError::NotFound)
            }
        });

        users
    }

    #[tokio::test]
    async fn users_can_delete_themselves() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_delete_user()
            .once()
            .withf(|caller, target| {
                caller.id == UserId::from_i64(TEST_USER_ID) && *target == caller.id
            })
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/users/{TEST_USER_ID}/delete"))
            .send(&users_service(users, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn non_staff_deleting_another_user_returns_403() -> TestResult {
        let mut res = TestClient::delete("http://example.com/users/2/delete")
            .send(&users_service(permission_checking_mock(&[1, 2]), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({ "detail": PERMISSION_DENIED })
        );

        Ok(())
    }

    #[tokio::test]
    async fn non_staff_deleting_a_missing_user_still_returns_403() -> TestResult {
        let res = TestClient::delete("http://example.com/users/99/delete")
            .send(&users_service(permission_checking_mock(&[1]), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn staff_can_delete_other_users() -> TestResult {
        let state = state_with(
            permission_checking_mock(&[1, 2]),
            strict_products_mock(),
            strict_auth_mock(),
        );

        let res = TestClient::delete("http://example.com/users/2/delete")
            .send(&service_as(make_user(1, true), state, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn staff_deleting_a_missing_user_returns_404() -> TestResult {
        let state = state_with(
            permission_checking_mock(&[1]),
            strict_products_mock(),
            strict_auth_mock(),
        );

        let mut res = TestClient::delete("http://example.com/users/99/delete")
            .send(&service_as(make_user(1, true), state, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({ "detail": NOT_FOUND })
        );

        Ok(())
    }

    #[tokio::test]
    async fn non_integer_id_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_delete_user().never();

        let mut res = TestClient::delete("http://example.com/users/abc/delete")
            .send(&users_service(users, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({ "id": ["A valid integer is required."] })
        );

        Ok(())
    }
}
