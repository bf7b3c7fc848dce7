//! Pagination Config

use clap::{Args, value_parser};

/// List pagination settings.
#[derive(Debug, Args)]
pub struct PaginationConfig {
    /// Items per page when the request does not ask for a size
    #[arg(long, env = "PAGE_SIZE", default_value_t = 10, value_parser = value_parser!(u64).range(1..))]
    pub page_size: u64,

    /// Upper bound for the `page_size` query parameter
    #[arg(long, env = "MAX_PAGE_SIZE", default_value_t = 100, value_parser = value_parser!(u64).range(1..))]
    pub max_page_size: u64,
}
