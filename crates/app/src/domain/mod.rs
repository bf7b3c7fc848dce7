//! Domain

pub mod products;
pub mod users;
