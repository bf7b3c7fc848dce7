//! Obtain Token Pair Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use shopfront_app::{
    auth::{AuthServiceError, Credentials, TokenPair},
    validation::FieldErrors,
};

use crate::{
    body::BodyFields,
    errors::{ApiError, NO_ACTIVE_ACCOUNT, ensure_valid},
    extensions::*,
    state::State,
    tokens::handlers::required,
};

/// Obtain Token Pair Request
#[derive(ToSchema)]
pub(crate) struct ObtainTokenRequest {
    pub username: String,
    pub password: String,
}

impl ObtainTokenRequest {
    fn from_fields(fields: &BodyFields) -> Result<Self, ApiError> {
        let mut errors = FieldErrors::new();

        let username = required(fields, &mut errors, "username");
        let password = required(fields, &mut errors, "password");

        ensure_valid(errors)?;

        Ok(Self { username, password })
    }
}

impl std::fmt::Debug for ObtainTokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObtainTokenRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<ObtainTokenRequest> for Credentials {
    fn from(request: ObtainTokenRequest) -> Self {
        Credentials {
            username: request.username,
            password: request.password,
        }
    }
}

/// Token Pair Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenPairResponse {
    /// Short-lived bearer token for API requests
    pub access: String,

    /// Long-lived token exchanged for new access tokens
    pub refresh: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: pair.access,
            refresh: pair.refresh,
        }
    }
}

/// Obtain Token Pair Handler
///
/// Exchanges a username and password for an access/refresh token pair.
#[endpoint(tags("auth"), summary = "Obtain Token Pair", request_body = ObtainTokenRequest)]
#[tracing::instrument(name = "tokens.obtain", skip(req, depot), err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let fields = BodyFields::parse(req).await?;
    let credentials = Credentials::from(ObtainTokenRequest::from_fields(&fields)?);
    let username = credentials.username.clone();

    let pair = match state.app.auth.obtain_token_pair(credentials).await {
        Ok(pair) => pair,
        Err(AuthServiceError::InvalidCredentials) => {
            tracing::info!(%username, "rejected token request");

            return Err(ApiError::Unauthenticated(NO_ACTIVE_ACCOUNT));
        }
        Err(source) => return Err(ApiError::internal("failed to obtain token pair", source)),
    };

    tracing::info!(%username, "issued token pair");

    Ok(Json(pair.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::CONTENT_TYPE,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use shopfront_app::auth::MockAuthService;

    use crate::test_helpers::{public_service, storage_error};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_service(auth, Router::with_path("token").post(handler))
    }

    #[tokio::test]
    async fn valid_credentials_return_a_token_pair() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_obtain_token_pair()
            .once()
            .withf(|credentials| {
                *credentials
                    == Credentials {
                        username: "alice".to_string(),
                        password: "password".to_string(),
                    }
            })
            .return_once(|_| {
                Ok(TokenPair {
                    access: "access-token".to_string(),
                    refresh: "refresh-token".to_string(),
                })
            });

        let mut res = TestClient::post("http://example.com/token")
            .json(&json!({ "username": "alice", "password": "password" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: TokenPairResponse = res.take_json().await?;

        assert_eq!(body.access, "access-token");
        assert_eq!(body.refresh, "refresh-token");

        Ok(())
    }

    #[tokio::test]
    async fn wrong_credentials_return_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_obtain_token_pair()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let mut res = TestClient::post("http://example.com/token")
            .json(&json!({ "username": "alice", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({ "detail": NO_ACTIVE_ACCOUNT })
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_fields_return_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_obtain_token_pair().never();

        let mut res = TestClient::post("http://example.com/token")
            .json(&json!({ "username": "" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({
                "password": ["This field is required."],
                "username": ["This field may not be blank."],
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_returns_500() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_obtain_token_pair()
            .once()
            .return_once(|_| Err(AuthServiceError::Sql(storage_error())));

        let res = TestClient::post("http://example.com/token")
            .json(&json!({ "username": "alice", "password": "password" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn form_credentials_are_accepted() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_obtain_token_pair()
            .once()
            .withf(|credentials| {
                credentials.username == "alice" && credentials.password == "password"
            })
            .return_once(|_| {
                Ok(TokenPair {
                    access: "access-token".to_string(),
                    refresh: "refresh-token".to_string(),
                })
            });

        let res = TestClient::post("http://example.com/token")
            .form(&[("username", "alice"), ("password", "password")])
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn empty_body_reports_every_required_field() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_obtain_token_pair().never();

        let mut res = TestClient::post("http://example.com/token")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({
                "password": ["This field is required."],
                "username": ["This field is required."],
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn wrongly_typed_password_returns_a_field_error() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_obtain_token_pair().never();

        let mut res = TestClient::post("http://example.com/token")
            .json(&json!({ "username": "alice", "password": { "plain": "password" } }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({ "password": ["Not a valid string."] })
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_returns_a_json_error() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_obtain_token_pair().never();

        let mut res = TestClient::post("http://example.com/token")
            .add_header(CONTENT_TYPE, "application/json", true)
            .body("{\"username\": \"alice\",")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body = res.take_json::<Value>().await?;

        assert!(
            body.get("detail")
                .and_then(Value::as_str)
                .is_some_and(|detail| detail.starts_with("JSON parse error")),
            "expected a JSON detail body, got {body}"
        );

        Ok(())
    }
}
