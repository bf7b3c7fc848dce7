//! Bearer token middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use shopfront_app::auth::AuthServiceError;

use crate::{
    errors::{ApiError, INVALID_TOKEN, NOT_AUTHENTICATED},
    extensions::*,
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(()) => {
            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &Request, depot: &mut Depot) -> Result<(), ApiError> {
    let token = extract_bearer_token(req).ok_or(ApiError::Unauthenticated(NOT_AUTHENTICATED))?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let caller = match state.app.auth.authenticate_bearer(token).await {
        Ok(caller) => caller,
        Err(AuthServiceError::InvalidToken | AuthServiceError::InvalidCredentials) => {
            debug!("rejected bearer token");

            return Err(ApiError::Unauthenticated(INVALID_TOKEN));
        }
        Err(source) => return Err(ApiError::internal("failed to authenticate bearer token", source)),
    };

    depot.insert_caller(caller);

    Ok(())
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
