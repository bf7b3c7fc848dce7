//! Products

mod errors;
mod handlers;
mod links;
mod models;
mod query;

pub(crate) use handlers::*;
