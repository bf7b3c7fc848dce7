//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use shopfront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        products::MockProductsService,
        users::{
            MockUsersService,
            records::{UserId, UserRecord},
        },
    },
};

use crate::{
    extensions::*,
    state::{Pagination, State},
};

pub(crate) const TEST_USER_ID: i64 = 1;

pub(crate) fn make_user(id: i64, is_staff: bool) -> UserRecord {
    UserRecord {
        id: UserId::from_i64(id),
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        is_staff,
        is_active: true,
        date_joined: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}

pub(crate) fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_update_profile().never();
    users.expect_delete_user().never();

    users
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_create_product().never();

    products
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_obtain_token_pair().never();
    auth.expect_refresh_access_token().never();
    auth.expect_authenticate_bearer().never();

    auth
}

pub(crate) fn state_with(
    users: MockUsersService,
    products: MockProductsService,
    auth: MockAuthService,
) -> Arc<State> {
    State::from_app_context(
        AppContext {
            users: Arc::new(users),
            products: Arc::new(products),
            auth: Arc::new(auth),
        },
        Pagination::default(),
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(strict_users_mock(), strict_products_mock(), auth)
}

/// Wraps `route` with state and a pre-authenticated caller.
pub(crate) fn service_as(caller: UserRecord, state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(InjectCaller(caller))
            .push(route),
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    service_as(
        make_user(TEST_USER_ID, false),
        state_with(users, strict_products_mock(), strict_auth_mock()),
        route,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service_as(
        make_user(TEST_USER_ID, false),
        state_with(strict_users_mock(), products, strict_auth_mock()),
        route,
    )
}

/// Unauthenticated service around `route`, for public endpoints.
pub(crate) fn public_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with_auth(auth))).push(route))
}

struct InjectCaller(UserRecord);

#[async_trait]
impl Handler for InjectCaller {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_caller(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}
