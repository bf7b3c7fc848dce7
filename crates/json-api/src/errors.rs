//! HTTP error responses.

use std::fmt::Display;

use salvo::{
    http::header::{HeaderValue, WWW_AUTHENTICATE},
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use shopfront_app::validation::FieldErrors;

pub(crate) const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
pub(crate) const INVALID_TOKEN: &str = "Given token not valid for any token type";
pub(crate) const NO_ACTIVE_ACCOUNT: &str = "No active account found with the given credentials";
pub(crate) const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";
pub(crate) const NOT_FOUND: &str = "Not found.";
pub(crate) const INVALID_PAGE: &str = "Invalid page.";
pub(crate) const SERVER_ERROR: &str = "A server error occurred.";

/// Single-message error body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorDetail {
    /// Human-readable reason
    pub detail: String,
}

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(&'static str),

    #[error("forbidden")]
    Forbidden,

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// Log `error` with `context` and hide it behind a generic 500.
    pub(crate) fn internal(context: &str, error: impl Display) -> Self {
        error!("{context}: {error}");

        Self::Internal
    }

    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(self) -> Result<String, FieldErrors> {
        match self {
            Self::Unauthenticated(detail) | Self::NotFound(detail) => Ok(detail.to_string()),
            Self::Forbidden => Ok(PERMISSION_DENIED.to_string()),
            Self::BadRequest(detail) => Ok(detail),
            Self::Validation(errors) => Err(errors),
            Self::UnsupportedMediaType(content_type) => Ok(format!(
                "Unsupported media type \"{content_type}\" in request."
            )),
            Self::Internal => Ok(SERVER_ERROR.to_string()),
        }
    }
}

/// Fails with [`ApiError::Validation`] when any field recorded a message.
pub(crate) fn ensure_valid(errors: FieldErrors) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status_code());

        if matches!(self, Self::Unauthenticated(_)) {
            res.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer realm=\"api\""),
            );
        }

        match self.detail() {
            Ok(detail) => res.render(Json(ErrorDetail { detail })),
            Err(errors) => res.render(Json(errors)),
        }
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        let schema = ErrorDetail::to_schema(components);

        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::UNAUTHORIZED, "Unauthorized"),
            (StatusCode::FORBIDDEN, "Forbidden"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description).add_content("application/json", schema.clone()),
            );
        }
    }
}
