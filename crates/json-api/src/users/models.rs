//! User Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use shopfront_app::{
    domain::users::{data::ProfileUpdate, records::UserRecord},
    validation::FieldErrors,
};

use crate::{
    body::BodyFields,
    errors::{ApiError, ensure_valid},
};

/// Public profile of a user.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Partial profile update. Omitted fields keep their stored values and
/// unrecognised fields are ignored.
#[derive(Debug, Default, ToSchema)]
pub(crate) struct UpdateMeRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateMeRequest {
    pub(crate) fn from_fields(fields: &BodyFields) -> Result<Self, ApiError> {
        let mut errors = FieldErrors::new();

        let request = Self {
            email: fields.string("email", &mut errors),
            first_name: fields.string("first_name", &mut errors),
            last_name: fields.string("last_name", &mut errors),
        };

        ensure_valid(errors)?;

        Ok(request)
    }
}

impl From<UpdateMeRequest> for ProfileUpdate {
    fn from(request: UpdateMeRequest) -> Self {
        ProfileUpdate {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
        }
    }
}
