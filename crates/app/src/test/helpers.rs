//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        products::{ProductsService, ProductsServiceError, data::NewProduct, records::ProductRecord},
        users::{UsersService, UsersServiceError, data::NewUser, records::UserRecord},
    },
    test::TestContext,
};

pub(crate) const TEST_PASSWORD: &str = "password";

pub(crate) async fn create_user(
    ctx: &TestContext,
    username: &str,
    is_staff: bool,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            username: username.to_string(),
            password: TEST_PASSWORD.to_string(),
            email: format!("{username}@example.com"),
            first_name: String::new(),
            last_name: String::new(),
            is_staff,
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            name: name.to_string(),
            price,
            description: None,
        })
        .await
}
