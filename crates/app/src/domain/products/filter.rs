//! Product list filters.

use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};

use crate::domain::products::records::ProductRecord;

/// Conjunction of optional product constraints. The default matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,

    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
}

impl ProductFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min_price(mut self, price: Decimal) -> Self {
        self.min_price = Some(price);
        self
    }

    #[must_use]
    pub fn max_price(mut self, price: Decimal) -> Self {
        self.max_price = Some(price);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// In-memory equivalent of the SQL predicate.
    #[must_use]
    pub fn matches(&self, product: &ProductRecord) -> bool {
        self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self.name.as_deref().is_none_or(|name| {
                product
                    .name
                    .to_lowercase()
                    .contains(&name.to_lowercase())
            })
    }

    /// Append a `WHERE` clause for this filter to `builder`.
    pub(crate) fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" WHERE TRUE");

        if let Some(min) = self.min_price {
            builder.push(" AND price >= ").push_bind(min);
        }

        if let Some(max) = self.max_price {
            builder.push(" AND price <= ").push_bind(max);
        }

        if let Some(name) = &self.name {
            builder
                .push(" AND POSITION(LOWER(")
                .push_bind(name.clone())
                .push(") IN LOWER(name)) > 0");
        }
    }
}
