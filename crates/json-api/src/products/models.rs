//! Product Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use shopfront_app::domain::products::records::ProductRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub(crate) struct ProductResponse {
    /// The product's identifier
    pub id: i64,

    pub name: String,

    /// Price with two decimal places, e.g. `"100.00"`
    pub price: String,

    pub description: Option<String>,

    /// RFC 3339 creation time
    pub created_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        let mut price = product.price;
        price.rescale(2);

        Self {
            id: product.id.into_i64(),
            name: product.name,
            price: price.to_string(),
            description: product.description,
            created_at: product.created_at.to_string(),
        }
    }
}

/// One page of products.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPageResponse {
    /// Total number of matching products across all pages
    pub count: u64,

    /// Absolute URL of the next page
    pub next: Option<String>,

    /// Absolute URL of the previous page
    pub previous: Option<String>,

    pub results: Vec<ProductResponse>,
}
