//! State

use std::sync::Arc;

use shopfront_app::{
    context::AppContext,
    pagination::{PageNumber, PageRequest},
};

use crate::config::pagination::PaginationConfig;

/// Page sizing applied to list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) default_page_size: u64,
    pub(crate) max_page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl From<&PaginationConfig> for Pagination {
    fn from(config: &PaginationConfig) -> Self {
        Self {
            default_page_size: config.page_size,
            max_page_size: config.max_page_size.max(config.page_size),
        }
    }
}

impl Pagination {
    /// Build a page request, capping an explicit size at the configured maximum.
    #[must_use]
    pub(crate) fn request(&self, number: PageNumber, size: Option<u64>) -> PageRequest {
        let size = size.map_or(self.default_page_size, |size| size.min(self.max_page_size));

        PageRequest::new(number, size)
    }
}

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) pagination: Pagination,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, pagination: Pagination) -> Self {
        Self { app, pagination }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, pagination: Pagination) -> Arc<Self> {
        Arc::new(Self::new(app, pagination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_size_uses_the_default() {
        let pagination = Pagination::default();

        assert_eq!(
            pagination.request(PageNumber::default(), None),
            PageRequest::new(PageNumber::Number(1), 10)
        );
    }

    #[test]
    fn explicit_size_is_capped() {
        let pagination = Pagination {
            default_page_size: 5,
            max_page_size: 20,
        };

        assert_eq!(pagination.request(PageNumber::Last, Some(50)).size, 20);
        assert_eq!(pagination.request(PageNumber::Last, Some(7)).size, 7);
    }
}
