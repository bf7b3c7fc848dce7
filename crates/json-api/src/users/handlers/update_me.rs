//! Update Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    body::BodyFields,
    errors::ApiError,
    extensions::*,
    state::State,
    users::{
        errors::into_api_error,
        models::{UpdateMeRequest, UserResponse},
    },
};

/// Update Current User Handler
///
/// Applies a partial update to the authenticated user's email and names. An empty
/// body leaves the profile unchanged.
#[endpoint(
    tags("users"),
    summary = "Update Current User",
    security(("bearer_auth" = [])),
    request_body = UpdateMeRequest,
)]
#[tracing::instrument(
    name = "users.update_me",
    skip(req, depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let update = UpdateMeRequest::from_fields(&BodyFields::parse(req).await?)?;

    tracing::Span::current().record("user_id", tracing::field::display(caller.id));

    let user = state
        .app
        .users
        .update_profile(caller.id, update.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(user_id = %user.id, "updated profile");

    Ok(Json(user.into()))
}
