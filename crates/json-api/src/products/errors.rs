//! Product Errors

use shopfront_app::domain::products::ProductsServiceError;

use crate::errors::{ApiError, INVALID_PAGE, NOT_FOUND};

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::InvalidPage => ApiError::NotFound(INVALID_PAGE),
        ProductsServiceError::NotFound => ApiError::NotFound(NOT_FOUND),
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            ApiError::BadRequest("Invalid product payload".to_string())
        }
        ProductsServiceError::Sql(source) => ApiError::internal("product storage error", source),
        ProductsServiceError::OutOfRange(source) => {
            ApiError::internal("product page out of range", source)
        }
    }
}
