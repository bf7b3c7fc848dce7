//! User Errors

use shopfront_app::domain::users::UsersServiceError;

use crate::errors::{ApiError, NOT_FOUND};

pub(crate) fn into_api_error(error: UsersServiceError) -> ApiError {
    match error {
        UsersServiceError::Forbidden => ApiError::Forbidden,
        UsersServiceError::NotFound => ApiError::NotFound(NOT_FOUND),
        UsersServiceError::Validation(errors) => ApiError::Validation(errors),
        UsersServiceError::AlreadyExists
        | UsersServiceError::MissingRequiredData
        | UsersServiceError::InvalidData => {
            ApiError::BadRequest("Invalid user payload".to_string())
        }
        UsersServiceError::Sql(source) => ApiError::internal("user storage error", source),
        UsersServiceError::Password(source) => ApiError::internal("password hashing error", source),
    }
}
