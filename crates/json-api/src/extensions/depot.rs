//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use shopfront_app::domain::users::records::UserRecord;

use crate::errors::{ApiError, NOT_AUTHENTICATED};

const CALLER_DEPOT_KEY: &str = "caller";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// Record the authenticated user for downstream handlers.
    fn insert_caller(&mut self, caller: UserRecord);

    fn caller_or_401(&self) -> Result<&UserRecord, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| {
            ApiError::internal(
                "missing depot value",
                std::any::type_name::<T>(),
            )
        })
    }

    fn insert_caller(&mut self, caller: UserRecord) {
        self.insert(CALLER_DEPOT_KEY, caller);
    }

    fn caller_or_401(&self) -> Result<&UserRecord, ApiError> {
        self.get::<UserRecord>(CALLER_DEPOT_KEY)
            .map_err(|_ignored| ApiError::Unauthenticated(NOT_AUTHENTICATED))
    }
}
