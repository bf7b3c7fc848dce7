//! Product list query parsing.

use std::str::FromStr;

use rust_decimal::Decimal;

use shopfront_app::{
    domain::products::ProductFilter,
    pagination::{PageNumber, PageRequest},
    validation::FieldErrors,
};

use crate::{
    errors::{ApiError, INVALID_PAGE},
    state::Pagination,
};

const INVALID_NUMBER: &str = "A valid number is required.";
const INVALID_INTEGER: &str = "A valid positive integer is required.";

/// Raw query string values for the product list.
#[derive(Debug, Default)]
pub(crate) struct ListQuery {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub name: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListQuery {
    /// Parse into a filter and page request.
    ///
    /// Malformed numbers fail with field errors; an unusable page number fails
    /// as a missing page.
    pub(crate) fn parse(
        self,
        pagination: &Pagination,
    ) -> Result<(ProductFilter, PageRequest), ApiError> {
        let mut errors = FieldErrors::new();
        let mut filter = ProductFilter::all();

        let min_price = parse_field::<Decimal>(&mut errors, "min_price", self.min_price, INVALID_NUMBER);
        let max_price = parse_field::<Decimal>(&mut errors, "max_price", self.max_price, INVALID_NUMBER);

        if let Some(min) = min_price {
            filter = filter.min_price(min);
        }

        if let Some(max) = max_price {
            filter = filter.max_price(max);
        }

        if let Some(name) = self.name {
            filter = filter.name(name);
        }

        let page_size =
            parse_field::<u64>(&mut errors, "page_size", self.page_size, INVALID_INTEGER)
                .filter(|size| *size > 0);

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let number = match self.page.as_deref() {
            None | Some("") => PageNumber::default(),
            Some(page) => page
                .parse::<PageNumber>()
                .map_err(|_invalid| ApiError::NotFound(INVALID_PAGE))?,
        };

        Ok((filter, pagination.request(number, page_size)))
    }
}

/// Blank values count as absent.
fn parse_field<T: FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    message: &str,
) -> Option<T> {
    let value = value.filter(|value| !value.trim().is_empty())?;

    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(field, message);
            None
        }
    }
}
