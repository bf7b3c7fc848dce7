//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        errors::into_api_error,
        links::{neighbours, request_url},
        models::{ProductPageResponse, ProductResponse},
        query::ListQuery,
    },
    state::State,
};

/// Product Index Handler
///
/// Returns one page of products, optionally filtered by an inclusive price
/// range and a case-insensitive name fragment.
#[endpoint(tags("products"), summary = "List Products", security(("bearer_auth" = [])))]
#[tracing::instrument(
    name = "products.index",
    skip(min_price, max_price, name, page, page_size, req, depot),
    fields(count = tracing::field::Empty, page = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    min_price: QueryParam<String, false>,
    max_price: QueryParam<String, false>,
    name: QueryParam<String, false>,
    page: QueryParam<String, false>,
    page_size: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let (filter, page_request) = ListQuery {
        min_price: min_price.into_inner(),
        max_price: max_price.into_inner(),
        name: name.into_inner(),
        page: page.into_inner(),
        page_size: page_size.into_inner(),
    }
    .parse(&state.pagination)?;

    let products = state
        .app
        .products
        .list_products(filter, page_request)
        .await
        .map_err(into_api_error)?;

    let span = tracing::Span::current();

    span.record("count", products.count);
    span.record("page", products.number);

    let url = request_url(req).or_500("failed to build request url")?;
    let (next, previous) = neighbours(&url, &products);

    Ok(Json(ProductPageResponse {
        count: products.count,
        next,
        previous,
        results: products.items.into_iter().map(ProductResponse::from).collect(),
    }))
}
