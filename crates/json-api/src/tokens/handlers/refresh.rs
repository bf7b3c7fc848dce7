//! Refresh Access Token Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use shopfront_app::{auth::AuthServiceError, validation::FieldErrors};

use crate::{
    body::BodyFields,
    errors::{ApiError, INVALID_TOKEN, ensure_valid},
    extensions::*,
    state::State,
    tokens::handlers::required,
};

/// Refresh Access Token Request
#[derive(ToSchema)]
pub(crate) struct RefreshTokenRequest {
    pub refresh: String,
}

impl RefreshTokenRequest {
    fn from_fields(fields: &BodyFields) -> Result<Self, ApiError> {
        let mut errors = FieldErrors::new();
        let refresh = required(fields, &mut errors, "refresh");

        ensure_valid(errors)?;

        Ok(Self { refresh })
    }
}

impl std::fmt::Debug for RefreshTokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenRequest").finish_non_exhaustive()
    }
}

/// Access Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccessTokenResponse {
    /// Fresh access token
    pub access: String,
}

/// Refresh Access Token Handler
#[endpoint(tags("auth"), summary = "Refresh Access Token", request_body = RefreshTokenRequest)]
#[tracing::instrument(name = "tokens.refresh", skip(req, depot), err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = RefreshTokenRequest::from_fields(&BodyFields::parse(req).await?)?;

    let access = match state.app.auth.refresh_access_token(&request.refresh).await {
        Ok(access) => access,
        Err(AuthServiceError::InvalidToken | AuthServiceError::InvalidCredentials) => {
            return Err(ApiError::Unauthenticated(INVALID_TOKEN));
        }
        Err(source) => return Err(ApiError::internal("failed to refresh access token", source)),
    };

    Ok(Json(AccessTokenResponse { access }))
}
