//! App Router

use salvo::{Router, Service, prelude::CatchPanic, trailing_slash::remove_slash};

use crate::{auth, products, tokens, users};

/// Token endpoints are public; everything else requires a bearer token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("token")
                .post(tokens::obtain::handler)
                .push(Router::with_path("refresh").post(tokens::refresh::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("users")
                        .push(Router::with_path("me").get(users::me::handler))
                        .push(Router::with_path("update-me").patch(users::update_me::handler))
                        .push(Router::with_path("{id}/delete").delete(users::delete::handler)),
                )
                .push(Router::with_path("products").get(products::index::handler)),
        )
}

/// Service-level hoops that must run before routing.
pub(crate) fn into_service(router: Router) -> Service {
    Service::new(router)
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
}
