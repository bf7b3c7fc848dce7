//! Current User Handler

use salvo::prelude::*;

use crate::{errors::ApiError, extensions::*, users::models::UserResponse};

/// Current User Handler
///
/// Returns the profile of the authenticated user.
#[endpoint(tags("users"), summary = "Get Current User", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, ApiError> {
    let caller = depot.caller_or_401()?;

    Ok(Json(caller.clone().into()))
}
